//! Shared data model for the nutrition console.
//!
//! Everything here is free of browser APIs so the rules can be unit-tested
//! natively and reused by every screen of the frontend.

pub mod domain;
pub mod shared;
pub mod usecases;

//! Common types and traits for all aggregates

pub mod aggregate_id;
pub mod aggregate_root;
pub mod collection;
pub mod image_source;
pub mod lenient;
pub mod timestamps;

// Re-exports
pub use aggregate_id::{generate_id, AggregateId};
pub use aggregate_root::AggregateRoot;
pub use collection::{Collection, CrudError};
pub use image_source::ImageSource;
pub use timestamps::{display_date, now_iso, parse_timestamp, today};

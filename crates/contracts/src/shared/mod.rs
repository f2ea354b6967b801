//! Persisted document shapes shared by the storage layer and the use cases

pub mod snapshot;

pub use snapshot::{FoodsSnapshot, RestaurantSnapshot, StoredEntry};

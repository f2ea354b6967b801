pub mod aggregate;
pub mod filter;

pub use aggregate::{Restaurant, RestaurantDto, RestaurantId};
pub use filter::{distinct_categories, RestaurantFilter};

pub mod context;
pub mod error;
pub mod favorites;
pub mod food_domain;
pub mod plan_store;
pub mod restaurant_domain;

pub use context::{use_stores, AppStores};
pub use error::DomainError;
pub use favorites::Favorites;
pub use food_domain::FoodDomain;
pub use plan_store::PlanStore;
pub use restaurant_domain::RestaurantDomain;

pub mod aggregate;
pub mod baseline;
pub mod filter;

pub use aggregate::{Food, FoodDto, FoodId, NutrientAmount};
pub use baseline::{BaselineDocument, BaselineFood};
pub use filter::{FoodFilter, FoodSort, RecommendedFilter};

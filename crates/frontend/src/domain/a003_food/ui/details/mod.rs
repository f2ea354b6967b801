//! Food details form (MVVM): per-100g figures, serving data and the
//! vitamin/mineral lines.

mod model;
mod view;
mod view_model;

pub use view::FoodDetails;
pub use view_model::FoodDetailsViewModel;

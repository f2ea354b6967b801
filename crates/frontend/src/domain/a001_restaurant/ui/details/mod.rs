//! Restaurant details form (MVVM):
//! - model.rs: store access
//! - view_model.rs: form state and save command
//! - view.rs: Leptos component

mod model;
mod view;
mod view_model;

pub use view::RestaurantDetails;
pub use view_model::RestaurantDetailsViewModel;

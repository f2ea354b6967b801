//! Menu details form (MVVM), including extended nutrients and image upload.

mod model;
mod view;
mod view_model;

pub use view::MenuDetails;
pub use view_model::MenuDetailsViewModel;

pub mod image_field;
pub mod page_header;
pub mod stat_card;

pub use image_field::{ImageField, Thumbnail};
pub use page_header::PageHeader;
pub use stat_card::{ProgressBar, StatCard};

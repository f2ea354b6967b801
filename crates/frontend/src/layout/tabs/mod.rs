//! Tab management
//!
//! - `page` wraps the content of one tab
//! - `registry` maps tab key to view
//! - `tab_labels` maps tab key to title

pub mod page;
pub mod registry;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_labels::tab_label_for_key;

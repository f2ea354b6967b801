pub mod right_panel;
pub mod windows_list;

pub use right_panel::RightPanel;

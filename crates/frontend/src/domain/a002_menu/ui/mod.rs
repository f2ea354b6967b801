pub mod browse;
pub mod details;
pub mod list;

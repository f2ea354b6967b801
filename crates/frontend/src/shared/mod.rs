pub mod baseline;
pub mod components;
pub mod config;
pub mod dialogs;
pub mod export;
pub mod files;
pub mod icons;
pub mod list_utils;
pub mod modal;
pub mod notice;
pub mod page_frame;
pub mod state;
pub mod storage;

pub mod config;
pub mod forms;
pub mod nav;
pub mod platform;
pub mod render;

pub mod config;
pub mod panels;
pub mod render;
pub mod tui;

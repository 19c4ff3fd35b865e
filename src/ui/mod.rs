//! Ratatui TUI 界面：聊天 + 文档预览

pub mod app;
pub mod event;
pub mod render;

pub use app::run_app;

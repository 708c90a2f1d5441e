//! TUI (Text User Interface) module for fmuviz
//!
//! Terminal setup, colors and layout helpers shared by the viewer.

pub mod app;
pub mod theme;
pub mod ui;

pub use app::TerminalGuard;
pub use theme::{current_theme, Theme};

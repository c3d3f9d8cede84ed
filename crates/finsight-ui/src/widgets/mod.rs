//! Reusable TUI widgets.

pub mod chat;
pub mod dialogs;

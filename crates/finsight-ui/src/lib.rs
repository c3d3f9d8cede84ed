//! Shared TUI widgets for FinSight.
//!
//! # Architecture
//!
//! The crate is organized into:
//! - `widgets` - ratatui widgets (chat timeline, input dialog)
//! - `theme` - Colors, styles, and visual constants
//! - `utils` - Text wrapping and truncation
//!
//! Widgets only read session data; they never mutate it.

pub mod theme;
pub mod utils;
pub mod widgets;

pub use theme::Theme;
pub use utils::{truncate, wrap_text, wrap_text_indented};
pub use widgets::chat::{ChatViewport, ChatWidget, SCROLL_BOTTOM};
pub use widgets::dialogs::{centered_rect, InputDialog};

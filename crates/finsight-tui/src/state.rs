//! UI state for rendering.

use crate::scroll::ScrollFollower;

/// Where typed keys go.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Keys edit the question draft.
    #[default]
    Chat,

    /// The open-file dialog is up and keys edit the path.
    OpenFile {
        path: String,
        error: Option<String>,
    },
}

/// Presentation-only state. Session data lives in the controller.
#[derive(Debug, Default)]
pub struct UiState {
    /// Current input target.
    pub input_mode: InputMode,

    /// Last health probe result; `None` until the first probe answers.
    pub backend_health: Option<bool>,

    /// Status message to display in footer.
    pub status_message: Option<String>,

    /// Chat scroll position.
    pub scroll: ScrollFollower,
}

impl UiState {
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn is_dialog_open(&self) -> bool {
        matches!(self.input_mode, InputMode::OpenFile { .. })
    }
}

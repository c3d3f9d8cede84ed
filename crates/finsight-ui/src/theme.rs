//! Theme and style definitions.

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the FinSight TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Primary accent color (highlights, active elements)
    pub accent: Color,
    /// Success color (document indexed, backend reachable)
    pub success: Color,
    /// Warning color (processing, waiting for an answer)
    pub warning: Color,
    /// Error color (backend unreachable, rejected file)
    pub error: Color,
    /// Muted color (timestamps, hints)
    pub muted: Color,
    /// User message color
    pub user: Color,
    /// Assistant message color
    pub assistant: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            muted: Color::DarkGray,
            user: Color::Cyan,
            assistant: Color::Green,
        }
    }
}

impl Theme {
    /// Style for focused/active borders.
    pub fn focused_border(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Style for unfocused borders.
    pub fn unfocused_border(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// Style for muted/secondary text.
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn bold(&self) -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    /// Style for user messages.
    pub fn user_style(&self) -> Style {
        Style::default().fg(self.user)
    }

    /// Style for assistant messages.
    pub fn assistant_style(&self) -> Style {
        Style::default().fg(self.assistant)
    }
}

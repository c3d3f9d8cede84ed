//! Chat widget for displaying the conversation timeline.

use finsight_core::{ChatMessage, ChatRole};
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::theme::Theme;
use crate::utils::wrap_text_indented;

/// Scroll value meaning "stick to the bottom".
pub const SCROLL_BOTTOM: usize = usize::MAX;

/// Geometry of the chat area after a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatViewport {
    /// Total rendered lines.
    pub total_lines: usize,
    /// Lines that fit inside the border.
    pub visible_height: usize,
    /// First visible line.
    pub offset: usize,
}

impl ChatViewport {
    /// Largest offset that still fills the view.
    pub fn max_scroll(&self) -> usize {
        self.total_lines.saturating_sub(self.visible_height)
    }
}

/// Conversation view.
#[derive(Debug, Clone)]
pub struct ChatWidget<'a> {
    /// Messages to display.
    messages: &'a [ChatMessage],
    /// Indicator shown below the last message while an answer is pending.
    pending: Option<&'a str>,
    /// Text shown when there are no messages yet.
    placeholder: Option<&'a str>,
    /// Scroll offset ([`SCROLL_BOTTOM`] = auto-scroll to bottom).
    scroll: usize,
    /// Whether the widget is focused.
    focused: bool,
    /// Theme for styling.
    theme: Theme,
}

impl<'a> ChatWidget<'a> {
    /// Create a new chat widget.
    pub fn new(messages: &'a [ChatMessage]) -> Self {
        Self {
            messages,
            pending: None,
            placeholder: None,
            scroll: SCROLL_BOTTOM,
            focused: false,
            theme: Theme::default(),
        }
    }

    /// Show a "waiting for answer" indicator.
    pub fn pending(mut self, indicator: Option<&'a str>) -> Self {
        self.pending = indicator;
        self
    }

    /// Text for an empty conversation.
    pub fn placeholder(mut self, text: &'a str) -> Self {
        self.placeholder = Some(text);
        self
    }

    /// Set the scroll offset.
    pub fn scroll(mut self, offset: usize) -> Self {
        self.scroll = offset;
        self
    }

    /// Set whether the widget is focused.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set the theme.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    fn build_lines(&self, text_width: usize) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = Vec::new();

        if self.messages.is_empty() {
            if let Some(placeholder) = self.placeholder {
                for wrapped in wrap_text_indented(placeholder, text_width, "  ") {
                    lines.push(Line::from(Span::styled(wrapped, self.theme.muted_style())));
                }
            }
        }

        for msg in self.messages {
            let (prefix, style) = match msg.role() {
                ChatRole::User => ("You: ", self.theme.user_style()),
                ChatRole::Assistant => ("FinSight: ", self.theme.assistant_style()),
            };

            lines.push(Line::from(vec![
                Span::styled(prefix, style.add_modifier(Modifier::BOLD)),
                Span::styled(
                    msg.created_at().format("%H:%M:%S").to_string(),
                    self.theme.muted_style(),
                ),
            ]));

            for wrapped in wrap_text_indented(msg.content(), text_width, "  ") {
                lines.push(Line::from(Span::raw(wrapped)));
            }

            lines.push(Line::from(""));
        }

        if let Some(indicator) = self.pending {
            lines.push(Line::from(vec![
                Span::styled(
                    "FinSight: ",
                    self.theme.assistant_style().add_modifier(Modifier::BOLD),
                ),
                Span::styled(indicator.to_string(), self.theme.warning_style()),
            ]));
        }

        lines
    }

    /// Render the widget and report where it ended up scrolled.
    pub fn render(self, frame: &mut Frame, area: Rect) -> ChatViewport {
        let border_style = if self.focused {
            self.theme.focused_border()
        } else {
            self.theme.unfocused_border()
        };

        let visible_height = area.height.saturating_sub(2) as usize;
        let text_width = area.width.saturating_sub(2) as usize;

        let all_lines = self.build_lines(text_width);
        let total_lines = all_lines.len();

        let max_scroll = total_lines.saturating_sub(visible_height);
        let offset = self.scroll.min(max_scroll);

        let lines: Vec<Line> = all_lines
            .into_iter()
            .skip(offset)
            .take(visible_height)
            .collect();

        let title = if total_lines == 0 {
            " Chat ".to_string()
        } else {
            let first = offset + 1;
            let last = (offset + visible_height).min(total_lines);
            format!(" Chat [{}-{}/{}] ", first, last, total_lines)
        };

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        );

        frame.render_widget(paragraph, area);

        ChatViewport {
            total_lines,
            visible_height,
            offset,
        }
    }
}

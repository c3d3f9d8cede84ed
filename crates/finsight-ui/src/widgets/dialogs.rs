//! Modal dialogs.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::theme::Theme;
use crate::utils::truncate;

const DIALOG_WIDTH: u16 = 64;
const DIALOG_HEIGHT: u16 = 8;

/// Create a centered rectangle within the given area.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// Single-line text prompt drawn over the rest of the screen.
///
/// The dialog only displays; the caller owns the buffer and the key handling.
#[derive(Debug, Clone)]
pub struct InputDialog<'a> {
    title: &'a str,
    prompt: &'a str,
    value: &'a str,
    /// Shown under the input in the error color, e.g. a rejected path.
    error: Option<&'a str>,
    theme: Theme,
}

impl<'a> InputDialog<'a> {
    /// Create a new input dialog.
    pub fn new(title: &'a str, prompt: &'a str, value: &'a str) -> Self {
        Self {
            title,
            prompt,
            value,
            error: None,
            theme: Theme::default(),
        }
    }

    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    /// Set the theme.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Render the dialog centered on the frame.
    pub fn render(self, frame: &mut Frame) {
        let area = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, frame.area());
        frame.render_widget(Clear, area);

        let inner_width = area.width.saturating_sub(4) as usize;

        // Keep the tail of long paths visible, that is where the cursor is.
        let shown = if self.value.chars().count() + 1 > inner_width {
            let keep = inner_width.saturating_sub(2);
            let skip = self.value.chars().count().saturating_sub(keep);
            format!("…{}", self.value.chars().skip(skip).collect::<String>())
        } else {
            self.value.to_string()
        };

        let error_line = match self.error {
            Some(err) => Line::from(Span::styled(
                format!("  {}", truncate(err, inner_width)),
                self.theme.error_style(),
            )),
            None => Line::from(""),
        };

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(format!("  {}", self.prompt), self.theme.bold())),
            Line::from(""),
            Line::from(vec![
                Span::styled(format!("  {}", shown), Style::default().fg(Color::White)),
                Span::styled("▏", Style::default().add_modifier(Modifier::SLOW_BLINK)),
            ]),
            error_line,
            Line::from(Span::styled(
                "  [Enter] Open  [Esc] Cancel",
                self.theme.muted_style(),
            )),
        ];

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.theme.focused_border())
                .title(format!(" {} ", self.title)),
        );

        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect(60, 8, area), Rect::new(20, 16, 60, 8));

        let small = Rect::new(5, 5, 30, 4);
        let rect = centered_rect(60, 8, small);
        assert_eq!(rect, Rect::new(5, 5, 30, 4));
    }

    #[test]
    fn test_input_dialog_shows_value_and_error() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|frame| {
                InputDialog::new("Open PDF", "Path:", "/tmp/report.txt")
                    .error(Some("only PDF files are supported"))
                    .render(frame)
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Open PDF"));
        assert!(text.contains("/tmp/report.txt"));
        assert!(text.contains("only PDF files are supported"));
    }
}

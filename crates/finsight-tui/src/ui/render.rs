//! Main render function for the TUI.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use finsight_core::{SessionState, SUGGESTED_QUESTIONS};
use finsight_ui::{truncate, ChatViewport, ChatWidget, InputDialog, Theme};

use crate::state::{InputMode, UiState};

const SIDEBAR_WIDTH: u16 = 40;

const EMPTY_CHAT: &str =
    "מערכת FinSight AI מוכנה. העלה דוח כספי ב-PDF (Ctrl-O) כדי להתחיל בתשאול הנתונים.";
const THINKING: &str = "חושב...";
const INPUT_PLACEHOLDER: &str = "שאל שאלה על נתוני הדוח...";

/// Render the entire UI.
///
/// Returns the chat viewport, or `None` when the terminal is too small to
/// show any chat lines.
pub fn render(frame: &mut Frame, session: &SessionState, ui: &UiState) -> Option<ChatViewport> {
    let theme = Theme::default();
    let area = frame.area();

    // Create main layout: header, body, input, footer
    let [header_area, body_area, input_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    let [sidebar_area, chat_area] =
        Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Fill(1)])
            .areas(body_area);

    render_header(frame, header_area, ui, &theme);
    render_sidebar(frame, sidebar_area, session, &theme);

    let viewport = render_chat(frame, chat_area, session, ui, &theme);

    render_input(frame, input_area, session, ui, &theme);
    render_footer(frame, footer_area, ui, &theme);

    if let InputMode::OpenFile { path, error } = &ui.input_mode {
        InputDialog::new("Open PDF", "Path to a PDF report:", path)
            .error(error.as_deref())
            .theme(theme)
            .render(frame);
    }

    viewport
}

/// Render the header with the backend health indicator.
fn render_header(frame: &mut Frame, area: Rect, ui: &UiState, theme: &Theme) {
    let health = match ui.backend_health {
        Some(true) => Span::styled("● מנוע RAG פעיל", theme.success_style()),
        Some(false) => Span::styled("● Backend offline", theme.error_style()),
        None => Span::styled("○ Checking backend...", theme.muted_style()),
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " FinSight AI ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        health,
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.unfocused_border()),
    );

    frame.render_widget(header, area);
}

/// Document panel on top, suggested questions below.
fn render_sidebar(frame: &mut Frame, area: Rect, session: &SessionState, theme: &Theme) {
    let [doc_area, suggestions_area] =
        Layout::vertical([Constraint::Length(7), Constraint::Fill(1)]).areas(area);

    let name_width = doc_area.width.saturating_sub(4) as usize;
    let mut lines = Vec::new();

    match session.selected_document() {
        None => {
            lines.push(Line::from(Span::styled(
                "  לחץ Ctrl-O להעלאת PDF",
                theme.bold(),
            )));
            lines.push(Line::from(Span::styled(
                "  דוחות רבעוניים או שנתיים",
                theme.muted_style(),
            )));
        }
        Some(doc) => {
            lines.push(Line::from(Span::styled(
                format!("  {}", truncate(doc.name(), name_width)),
                theme.bold(),
            )));

            let status = if session.ingestion_in_flight() {
                Span::styled("  מעבד מסמך...", theme.warning_style())
            } else if session.document_ready() {
                Span::styled("  ✓ המסמך אונדקס בהצלחה", theme.success_style())
            } else {
                Span::styled("  מוכן לעיבוד (Ctrl-P)", Style::default().fg(Color::Blue))
            };
            lines.push(Line::from(status));
            lines.push(Line::from(Span::styled(
                format!("  {} KB", doc.len().div_ceil(1024)),
                theme.muted_style(),
            )));
        }
    }

    let documents = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.unfocused_border())
            .title(" ניהול מסמכים "),
    );
    frame.render_widget(documents, doc_area);

    let enabled = session.can_query();
    let question_style = if enabled {
        Style::default()
    } else {
        theme.muted_style()
    };

    let suggestions: Vec<Line> = SUGGESTED_QUESTIONS
        .iter()
        .enumerate()
        .flat_map(|(i, question)| {
            [
                Line::from(vec![
                    Span::styled(format!(" F{} ", i + 1), theme.bold().fg(theme.accent)),
                    Span::styled(*question, question_style),
                ]),
                Line::from(""),
            ]
        })
        .collect();

    let panel = Paragraph::new(suggestions).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.unfocused_border())
            .title(" תובנות מהירות "),
    );
    frame.render_widget(panel, suggestions_area);
}

fn render_chat(
    frame: &mut Frame,
    area: Rect,
    session: &SessionState,
    ui: &UiState,
    theme: &Theme,
) -> Option<ChatViewport> {
    if area.width < 3 || area.height < 3 {
        return None;
    }

    let viewport = ChatWidget::new(session.timeline().messages())
        .placeholder(EMPTY_CHAT)
        .pending(session.query_in_flight().then_some(THINKING))
        .scroll(ui.scroll.offset())
        .focused(!ui.is_dialog_open())
        .theme(theme.clone())
        .render(frame, area);

    (viewport.visible_height > 0).then_some(viewport)
}

/// Render the question input line.
fn render_input(frame: &mut Frame, area: Rect, session: &SessionState, ui: &UiState, theme: &Theme) {
    let draft = session.draft_input();
    let width = area.width.saturating_sub(4) as usize;

    let content = if draft.is_empty() && !session.can_query() {
        Line::from(Span::styled(format!(" {}", INPUT_PLACEHOLDER), theme.muted_style()))
    } else {
        // Keep the end of the draft visible while typing.
        let chars: Vec<char> = draft.chars().collect();
        let start = chars.len().saturating_sub(width.saturating_sub(1));
        let shown: String = chars[start..].iter().collect();
        Line::from(vec![
            Span::raw(format!(" {}", shown)),
            Span::styled("▏", theme.bold()),
        ])
    };

    let border = if session.can_query() && !ui.is_dialog_open() {
        theme.focused_border()
    } else {
        theme.unfocused_border()
    };

    let input = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Question [Enter] "),
    );
    frame.render_widget(input, area);
}

/// Render the footer with status message.
fn render_footer(frame: &mut Frame, area: Rect, ui: &UiState, theme: &Theme) {
    let status = ui.status_message.as_deref().unwrap_or("Ready");

    let help = " Ctrl-O: open | Ctrl-P: process | F1-F4: suggestions | PgUp/PgDn: scroll | Ctrl-R: health | Esc: quit ";

    let footer = Line::from(vec![
        Span::styled(status.to_string(), theme.success_style()),
        Span::raw(" | "),
        Span::styled(help, theme.muted_style()),
    ]);

    frame.render_widget(Paragraph::new(footer), area);
}

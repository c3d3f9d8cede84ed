//! Application state and main event loop.

use std::path::PathBuf;
use std::time::Duration;

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use finsight_core::{Resolution, SessionController, SUGGESTED_QUESTIONS};

use crate::config::load_document;
use crate::dispatch::ChannelDispatcher;
use crate::event::{BackendCommand, UiEvent};
use crate::state::{InputMode, UiState};
use crate::ui;

/// Main application: the session controller plus presentation state.
pub struct App {
    /// Owns all session state. Only mutated on this thread.
    session: SessionController<ChannelDispatcher>,

    /// Presentation state.
    state: UiState,

    /// Receiver for events from the request runner.
    ui_rx: mpsc::Receiver<UiEvent>,

    /// How long to wait for terminal input per frame.
    tick: Duration,
}

impl App {
    /// Create a new application instance with channel handles.
    pub fn new(
        session: SessionController<ChannelDispatcher>,
        ui_rx: mpsc::Receiver<UiEvent>,
        tick: Duration,
    ) -> Self {
        let mut app = Self {
            session,
            state: UiState::default(),
            ui_rx,
            tick,
        };
        app.after_update();
        app
    }

    /// Run the main event loop.
    ///
    /// This runs on the main thread and handles:
    /// - Drawing the UI
    /// - Processing keyboard input
    /// - Applying resolutions from the request runner
    pub fn run(&mut self, mut terminal: DefaultTerminal) -> std::io::Result<()> {
        loop {
            let mut viewport = None;
            terminal.draw(|frame| {
                viewport = ui::render(frame, self.session.state(), &self.state);
            })?;

            // Snap to the bottom now that the chat has been laid out.
            if self.state.scroll.settle(viewport) {
                terminal.draw(|frame| {
                    ui::render(frame, self.session.state(), &self.state);
                })?;
            }

            // Poll terminal events (non-blocking with short timeout)
            if event::poll(self.tick)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && self.handle_key(key) {
                        break; // quit requested
                    }
                }
            }

            // Process runner events (non-blocking)
            while let Ok(event) = self.ui_rx.try_recv() {
                self.apply_event(event);
            }
        }

        // Send quit command to the runner
        let _ = self
            .session
            .dispatcher()
            .commands()
            .blocking_send(BackendCommand::Quit);

        info!("UI loop finished");
        Ok(())
    }

    /// Apply an event from the request runner.
    fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Resolved(resolution) => {
                let was_in_flight = match &resolution {
                    Resolution::Ingestion { .. } => self.session.state().ingestion_in_flight(),
                    Resolution::Query { .. } => self.session.state().query_in_flight(),
                };
                let status = match &resolution {
                    Resolution::Ingestion { document_name, .. } if resolution.is_success() => {
                        Some(format!("Indexed {}", document_name))
                    }
                    Resolution::Ingestion { .. } => Some("Document processing failed".to_string()),
                    Resolution::Query { .. } if !resolution.is_success() => {
                        Some("Query failed".to_string())
                    }
                    Resolution::Query { .. } => None,
                };
                let is_ingestion = matches!(resolution, Resolution::Ingestion { .. });
                self.session.apply(resolution);
                let still_in_flight = if is_ingestion {
                    self.session.state().ingestion_in_flight()
                } else {
                    self.session.state().query_in_flight()
                };
                // Stale resolutions leave the flags alone and must not touch the footer.
                if was_in_flight && !still_in_flight {
                    if let Some(status) = status {
                        self.state.set_status(status);
                    }
                }
            }
            UiEvent::BackendHealth(healthy) => {
                self.state.backend_health = Some(healthy);
            }
            UiEvent::Error(msg) => {
                self.state.set_status(msg);
            }
        }
        self.after_update();
    }

    /// Handle a key press.
    ///
    /// Returns true if the app should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        let quit = if self.state.is_dialog_open() {
            self.handle_dialog_key(key.code);
            false
        } else {
            self.handle_chat_key(key)
        };

        self.after_update();
        quit
    }

    fn handle_chat_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => return true,

            // Document handling
            KeyCode::Char('o') if ctrl => {
                self.state.input_mode = InputMode::OpenFile {
                    path: String::new(),
                    error: None,
                };
            }
            KeyCode::Char('p') if ctrl => self.process_document(),

            // Health probe
            KeyCode::Char('r') if ctrl => {
                self.state.backend_health = None;
                if self
                    .session
                    .dispatcher()
                    .commands()
                    .try_send(BackendCommand::CheckHealth)
                    .is_err()
                {
                    warn!("Could not request health check");
                    self.state.backend_health = Some(false);
                }
            }

            // Suggested questions
            KeyCode::F(n @ 1..=4) => {
                let question = SUGGESTED_QUESTIONS[usize::from(n) - 1];
                if self.explain_blocked_query() {
                    self.session.use_suggested_question(question);
                }
            }

            // Draft editing
            KeyCode::Enter => {
                if self.explain_blocked_query() {
                    self.session.submit_draft();
                }
            }
            KeyCode::Backspace => self.session.pop_draft_char(),
            KeyCode::Char(c) if !ctrl => self.session.push_draft_char(c),

            // Chat scrolling
            KeyCode::PageUp => self.state.scroll.page_up(),
            KeyCode::PageDown => self.state.scroll.page_down(),
            KeyCode::Home => self.state.scroll.to_top(),
            KeyCode::End => self.state.scroll.to_bottom(),

            _ => {}
        }
        false
    }

    fn handle_dialog_key(&mut self, code: KeyCode) {
        let InputMode::OpenFile { path, error } = &mut self.state.input_mode else {
            return;
        };

        match code {
            KeyCode::Esc => {
                self.state.input_mode = InputMode::Chat;
            }
            KeyCode::Enter => {
                let candidate = PathBuf::from(path.trim());
                match load_document(&candidate) {
                    Ok(document) => {
                        info!(document = %document.name(), bytes = document.len(), "Document staged");
                        let status = format!("Selected {} - press Ctrl-P to process", document.name());
                        self.session.select_document(document);
                        self.state.input_mode = InputMode::Chat;
                        self.state.set_status(status);
                    }
                    Err(e) => {
                        debug!(error = %e, "Rejected document");
                        *error = Some(e.to_string());
                    }
                }
            }
            KeyCode::Backspace => {
                path.pop();
                *error = None;
            }
            KeyCode::Char(c) => {
                path.push(c);
                *error = None;
            }
            _ => {}
        }
    }

    fn process_document(&mut self) {
        let session = self.session.state();
        if session.can_ingest() {
            self.session.begin_ingestion();
            if self.session.state().ingestion_in_flight() {
                self.state.set_status("Processing document...");
            } else {
                self.state.set_status("Document processing failed");
            }
        } else if session.selected_document().is_none() {
            self.state.set_status("No document selected - press Ctrl-O to open a PDF");
        } else {
            self.state.set_status("Document is already being processed");
        }
    }

    /// Show why a question cannot be sent yet.
    ///
    /// Returns true when a query is allowed. The controller enforces the same
    /// rules; this only feeds the status line.
    fn explain_blocked_query(&mut self) -> bool {
        let session = self.session.state();
        if session.query_in_flight() {
            self.state.set_status("Waiting for the previous answer");
            false
        } else if !session.document_ready() {
            self.state.set_status("Process a document first (Ctrl-O, then Ctrl-P)");
            false
        } else {
            true
        }
    }

    /// Bookkeeping after any key or runner event.
    fn after_update(&mut self) {
        let len = self.session.state().timeline().len();
        self.state.scroll.note_timeline(len);
    }
}

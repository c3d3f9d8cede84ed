//! Session controller: ingestion and conversation operations.
//!
//! The controller owns the [`SessionState`] and hands every request it starts
//! to a [`Dispatcher`]. Resolutions come back through [`SessionController::apply`]
//! on the same thread, so there is exactly one mutator.

use std::mem;

use tracing::{debug, error};

use crate::document::StagedDocument;
use crate::error::CoreError;
use crate::request::{Request, Resolution};
use crate::session::SessionState;
use crate::transition;

/// Hands requests to whatever performs the backend calls.
///
/// Implementations must eventually deliver exactly one [`Resolution`] per
/// accepted request back to [`SessionController::apply`].
pub trait Dispatcher {
    fn dispatch(&mut self, request: Request) -> Result<(), CoreError>;
}

/// Owner of one session's state.
pub struct SessionController<D> {
    state: SessionState,
    dispatcher: D,
}

impl<D: Dispatcher> SessionController<D> {
    /// Start a new session that sends its requests through `dispatcher`.
    pub fn new(dispatcher: D) -> Self {
        Self {
            state: SessionState::new(),
            dispatcher,
        }
    }

    /// Read-only view of the session.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Stage a document, replacing any previous selection.
    pub fn select_document(&mut self, document: StagedDocument) {
        let state = mem::take(&mut self.state);
        self.state = transition::select_document(state, document);
    }

    /// Upload the staged document for ingestion.
    ///
    /// No-op when nothing is staged or an ingestion is already running.
    pub fn begin_ingestion(&mut self) {
        let state = mem::take(&mut self.state);
        let (state, request) = transition::begin_ingestion(state);
        self.state = state;
        if let Some(request) = request {
            self.send(request);
        }
    }

    /// Ask a question about the ingested document.
    ///
    /// No-op when the text is blank, the document is not ready, or another
    /// question is still waiting for its answer.
    pub fn submit_question(&mut self, text: &str) {
        let state = mem::take(&mut self.state);
        let (state, request) = transition::submit_question(state, text);
        self.state = state;
        if let Some(request) = request {
            self.send(request);
        }
    }

    /// Submit whatever is currently in the draft.
    pub fn submit_draft(&mut self) {
        let draft = self.state.draft_input.clone();
        self.submit_question(&draft);
    }

    /// Put a suggested question in the draft and submit it.
    pub fn use_suggested_question(&mut self, text: &str) {
        self.set_draft(text);
        self.submit_draft();
    }

    /// Replace the draft text.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.state.draft_input = text.into();
    }

    pub fn push_draft_char(&mut self, ch: char) {
        self.state.draft_input.push(ch);
    }

    pub fn pop_draft_char(&mut self) {
        self.state.draft_input.pop();
    }

    /// Apply the resolution of a dispatched request.
    pub fn apply(&mut self, resolution: Resolution) {
        let state = mem::take(&mut self.state);
        self.state = transition::resolve(state, resolution);
    }

    fn send(&mut self, request: Request) {
        debug!(request_id = %request.id, kind = request.label(), "Dispatching request");
        let failed = request.clone();
        if let Err(e) = self.dispatcher.dispatch(request) {
            error!(request_id = %failed.id, error = %e, "Dispatch failed");
            self.apply(failed.fail(e.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ChatRole;
    use crate::notices::{INGESTION_FAILED_NOTICE, SUGGESTED_QUESTIONS};
    use crate::request::{Outcome, RequestKind};

    /// Records requests; the test decides when and how they resolve.
    #[derive(Default)]
    struct RecordingDispatcher {
        requests: Vec<Request>,
    }

    impl Dispatcher for RecordingDispatcher {
        fn dispatch(&mut self, request: Request) -> Result<(), CoreError> {
            self.requests.push(request);
            Ok(())
        }
    }

    struct ClosedDispatcher;

    impl Dispatcher for ClosedDispatcher {
        fn dispatch(&mut self, _request: Request) -> Result<(), CoreError> {
            Err(CoreError::DispatchFailed("runner stopped".to_string()))
        }
    }

    fn pdf(name: &str) -> StagedDocument {
        StagedDocument::pdf(name, b"%PDF-1.7".to_vec()).unwrap()
    }

    fn controller() -> SessionController<RecordingDispatcher> {
        SessionController::new(RecordingDispatcher::default())
    }

    fn last_request(c: &SessionController<RecordingDispatcher>) -> Request {
        c.dispatcher().requests.last().cloned().unwrap()
    }

    fn succeed_ingestion(c: &mut SessionController<RecordingDispatcher>) {
        let request = last_request(c);
        let RequestKind::Ingest { document } = &request.kind else {
            panic!("expected ingest request, got {:?}", request.kind);
        };
        c.apply(Resolution::Ingestion {
            request_id: request.id.clone(),
            document_name: document.name().to_string(),
            outcome: Outcome::Success(()),
        });
    }

    fn ready_controller() -> SessionController<RecordingDispatcher> {
        let mut c = controller();
        c.select_document(pdf("Q3.pdf"));
        c.begin_ingestion();
        succeed_ingestion(&mut c);
        c
    }

    fn answer(c: &mut SessionController<RecordingDispatcher>, text: &str) {
        let request = last_request(c);
        c.apply(Resolution::Query {
            request_id: request.id,
            outcome: Outcome::Success(text.to_string()),
        });
    }

    #[test]
    fn test_ingestion_round_trip() {
        let mut c = controller();
        c.select_document(pdf("Q3.pdf"));
        c.begin_ingestion();

        assert!(c.state().ingestion_in_flight());
        assert_eq!(c.dispatcher().requests.len(), 1);

        succeed_ingestion(&mut c);

        let state = c.state();
        assert!(state.document_ready());
        assert!(!state.ingestion_in_flight());
        assert_eq!(state.timeline().len(), 1);
        let message = state.timeline().last().unwrap();
        assert_eq!(message.role(), ChatRole::Assistant);
        assert!(message.content().contains("Q3.pdf"));
    }

    #[test]
    fn test_ingestion_failure() {
        let mut c = controller();
        c.select_document(pdf("Q3.pdf"));
        c.begin_ingestion();
        let request = last_request(&c);
        c.apply(request.fail("HTTP 500"));

        let state = c.state();
        assert!(!state.document_ready());
        assert!(!state.ingestion_in_flight());
        assert_eq!(state.timeline().len(), 1);
        assert_eq!(state.timeline().last().unwrap().role(), ChatRole::Assistant);
        assert_eq!(state.timeline().last().unwrap().content(), INGESTION_FAILED_NOTICE);
    }

    #[test]
    fn test_double_begin_ingestion_dispatches_once() {
        let mut c = controller();
        c.select_document(pdf("Q3.pdf"));
        c.begin_ingestion();
        c.begin_ingestion();

        assert_eq!(c.dispatcher().requests.len(), 1);
    }

    #[test]
    fn test_begin_ingestion_without_selection_is_noop() {
        let mut c = controller();
        c.begin_ingestion();

        assert!(c.dispatcher().requests.is_empty());
        assert!(!c.state().ingestion_in_flight());
        assert!(c.state().timeline().is_empty());
    }

    #[test]
    fn test_selecting_new_document_drops_readiness_immediately() {
        let mut c = ready_controller();
        let dispatched = c.dispatcher().requests.len();
        assert!(c.state().document_ready());

        c.select_document(pdf("Q4.pdf"));

        assert!(!c.state().document_ready());
        assert_eq!(c.state().selected_document().unwrap().name(), "Q4.pdf");
        assert_eq!(c.dispatcher().requests.len(), dispatched);
    }

    #[test]
    fn test_in_flight_ingestion_resolves_for_sent_document() {
        let mut c = controller();
        c.select_document(pdf("Q3.pdf"));
        c.begin_ingestion();
        c.select_document(pdf("Q4.pdf"));
        succeed_ingestion(&mut c);

        let state = c.state();
        assert!(state.document_ready());
        assert_eq!(state.selected_document().unwrap().name(), "Q4.pdf");
        assert!(state.timeline().last().unwrap().content().contains("Q3.pdf"));
    }

    #[test]
    fn test_blank_or_unready_questions_are_ignored() {
        let mut c = controller();
        c.submit_question("growth?");
        assert!(c.state().timeline().is_empty());
        assert!(c.dispatcher().requests.is_empty());

        let mut c = ready_controller();
        let messages = c.state().timeline().len();
        let dispatched = c.dispatcher().requests.len();
        c.submit_question("");
        c.submit_question("   ");

        assert_eq!(c.state().timeline().len(), messages);
        assert_eq!(c.dispatcher().requests.len(), dispatched);
        assert!(!c.state().query_in_flight());
    }

    #[test]
    fn test_question_round_trip() {
        let mut c = ready_controller();
        let before = c.state().timeline().len();
        c.set_draft("מה היה אחוז הצמיחה בהכנסות?");
        c.submit_question("מה היה אחוז הצמיחה בהכנסות?");

        assert!(c.state().query_in_flight());
        assert_eq!(c.state().draft_input(), "");
        assert_eq!(
            last_request(&c).kind,
            RequestKind::Query {
                question: "מה היה אחוז הצמיחה בהכנסות?".to_string()
            }
        );

        answer(&mut c, "12%");

        let state = c.state();
        let added = &state.timeline().messages()[before..];
        assert_eq!(added.len(), 2);
        assert_eq!(added[0].role(), ChatRole::User);
        assert_eq!(added[0].content(), "מה היה אחוז הצמיחה בהכנסות?");
        assert_eq!(added[1].role(), ChatRole::Assistant);
        assert_eq!(added[1].content(), "12%");
        assert!(!state.query_in_flight());
    }

    #[test]
    fn test_no_second_query_while_one_is_in_flight() {
        let mut c = ready_controller();
        let dispatched = c.dispatcher().requests.len();
        c.submit_question("first?");
        c.submit_question("second?");
        c.use_suggested_question(SUGGESTED_QUESTIONS[0]);

        assert_eq!(c.dispatcher().requests.len(), dispatched + 1);
        assert_eq!(c.state().timeline().last().unwrap().content(), "first?");

        answer(&mut c, "answer");
        c.submit_question("second?");
        assert_eq!(c.dispatcher().requests.len(), dispatched + 2);
    }

    #[test]
    fn test_suggestion_matches_draft_then_submit() {
        for suggestion in SUGGESTED_QUESTIONS {
            let mut via_suggestion = ready_controller();
            via_suggestion.use_suggested_question(suggestion);

            let mut via_draft = ready_controller();
            via_draft.set_draft(suggestion);
            via_draft.submit_question(suggestion);

            let contents = |c: &SessionController<RecordingDispatcher>| {
                c.state()
                    .timeline()
                    .iter()
                    .map(|m| (m.role(), m.content().to_string()))
                    .collect::<Vec<_>>()
            };
            assert_eq!(contents(&via_suggestion), contents(&via_draft));
            assert_eq!(via_suggestion.state().draft_input(), via_draft.state().draft_input());
            assert_eq!(
                via_suggestion.state().query_in_flight(),
                via_draft.state().query_in_flight()
            );
        }
    }

    #[test]
    fn test_suggestion_before_ready_leaves_draft() {
        let mut c = controller();
        c.use_suggested_question(SUGGESTED_QUESTIONS[1]);

        assert_eq!(c.state().draft_input(), SUGGESTED_QUESTIONS[1]);
        assert!(c.state().timeline().is_empty());
        assert!(c.dispatcher().requests.is_empty());
    }

    #[test]
    fn test_ingestion_and_query_can_overlap() {
        let mut c = ready_controller();
        c.submit_question("growth?");
        let query = last_request(&c);

        c.select_document(pdf("Q4.pdf"));
        c.begin_ingestion();
        assert!(c.state().query_in_flight());
        assert!(c.state().ingestion_in_flight());

        c.apply(Resolution::Query {
            request_id: query.id,
            outcome: Outcome::Success("12%".to_string()),
        });
        succeed_ingestion(&mut c);

        let state = c.state();
        assert!(!state.query_in_flight());
        assert!(!state.ingestion_in_flight());
        assert!(state.document_ready());
        let tail: Vec<_> = state.timeline().iter().rev().take(3).map(|m| m.content()).collect();
        assert_eq!(tail[2], "growth?");
        assert_eq!(tail[1], "12%");
        assert!(tail[0].contains("Q4.pdf"));
    }

    #[test]
    fn test_dispatch_failure_resolves_immediately() {
        let mut c = SessionController::new(ClosedDispatcher);
        c.select_document(pdf("Q3.pdf"));
        c.begin_ingestion();

        let state = c.state();
        assert!(!state.ingestion_in_flight());
        assert!(!state.document_ready());
        assert_eq!(state.timeline().len(), 1);
        assert_eq!(state.timeline().last().unwrap().content(), INGESTION_FAILED_NOTICE);
    }

    #[test]
    fn test_draft_editing() {
        let mut c = controller();
        c.push_draft_char('a');
        c.push_draft_char('ב');
        c.pop_draft_char();
        c.push_draft_char('c');
        assert_eq!(c.state().draft_input(), "ac");
    }
}

//! Pure state transitions.
//!
//! Each function takes the current state by value and returns the next one,
//! plus the request to dispatch when the transition starts backend work.
//! Nothing here performs I/O, so every rule can be tested without a network.

use tracing::{debug, info, warn};

use crate::document::StagedDocument;
use crate::ids::RequestId;
use crate::notices::{ingestion_succeeded, INGESTION_FAILED_NOTICE, QUERY_FAILED_NOTICE};
use crate::request::{Outcome, Request, RequestKind, Resolution};
use crate::session::SessionState;

/// Stage a document. Readiness is dropped immediately; nothing is sent.
pub fn select_document(mut state: SessionState, document: StagedDocument) -> SessionState {
    debug!(document = %document.name(), bytes = document.len(), "Document staged");
    state.selected_document = Some(document);
    state.document_ready = false;
    state
}

/// Start ingesting the staged document.
///
/// Returns no request when nothing is staged or an ingestion is already in
/// flight.
pub fn begin_ingestion(mut state: SessionState) -> (SessionState, Option<Request>) {
    if state.ingestion_in_flight() {
        debug!("Ingestion already in flight, ignoring");
        return (state, None);
    }
    let Some(document) = state.selected_document.clone() else {
        debug!("No document staged, ignoring ingestion request");
        return (state, None);
    };

    let id = RequestId::generate();
    state.ingestion_request = Some(id.clone());
    state.document_ready = false;

    let request = Request {
        id,
        kind: RequestKind::Ingest { document },
    };
    (state, Some(request))
}

/// Submit a question.
///
/// Silently returns no request when the trimmed text is empty, no document
/// is ready, or a query is already in flight.
pub fn submit_question(mut state: SessionState, text: &str) -> (SessionState, Option<Request>) {
    let question = text.trim();
    if question.is_empty() || !state.can_query() {
        return (state, None);
    }

    state.timeline.push_user(question);
    state.draft_input.clear();

    let id = RequestId::generate();
    state.query_request = Some(id.clone());

    let request = Request {
        id,
        kind: RequestKind::Query {
            question: question.to_string(),
        },
    };
    (state, Some(request))
}

/// Apply the resolution of a previously dispatched request.
///
/// A resolution for anything other than the outstanding request of its kind
/// is ignored.
pub fn resolve(mut state: SessionState, resolution: Resolution) -> SessionState {
    match resolution {
        Resolution::Ingestion {
            request_id,
            document_name,
            outcome,
        } => {
            if state.ingestion_request.as_ref() != Some(&request_id) {
                warn!(request_id = %request_id, "Ignoring stale ingestion resolution");
                return state;
            }
            state.ingestion_request = None;

            match outcome {
                Outcome::Success(()) => {
                    info!(document = %document_name, "Document ingested");
                    state.document_ready = true;
                    state.timeline.push_assistant(ingestion_succeeded(&document_name));
                }
                Outcome::Failure { reason } => {
                    warn!(document = %document_name, reason = %reason, "Ingestion failed");
                    state.timeline.push_assistant(INGESTION_FAILED_NOTICE);
                }
            }
        }
        Resolution::Query {
            request_id,
            outcome,
        } => {
            if state.query_request.as_ref() != Some(&request_id) {
                warn!(request_id = %request_id, "Ignoring stale query resolution");
                return state;
            }
            state.query_request = None;

            match outcome {
                Outcome::Success(answer) => {
                    debug!(chars = answer.chars().count(), "Answer received");
                    state.timeline.push_assistant(answer);
                }
                Outcome::Failure { reason } => {
                    warn!(reason = %reason, "Query failed");
                    state.timeline.push_assistant(QUERY_FAILED_NOTICE);
                }
            }
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ChatRole;

    fn ready_state() -> SessionState {
        let state = select_document(SessionState::new(), StagedDocument::new("Q3.pdf", b"%PDF".to_vec()));
        let (state, request) = begin_ingestion(state);
        let request = request.unwrap();
        resolve(
            state,
            Resolution::Ingestion {
                request_id: request.id,
                document_name: "Q3.pdf".to_string(),
                outcome: Outcome::Success(()),
            },
        )
    }

    #[test]
    fn test_begin_ingestion_without_document_is_noop() {
        let (state, request) = begin_ingestion(SessionState::new());
        assert!(request.is_none());
        assert!(!state.ingestion_in_flight());
    }

    #[test]
    fn test_begin_ingestion_clears_readiness() {
        let (state, request) = begin_ingestion(ready_state());
        assert!(request.is_some());
        assert!(state.ingestion_in_flight());
        assert!(!state.document_ready());
    }

    #[test]
    fn test_submit_question_trims_text() {
        let (state, request) = submit_question(ready_state(), "  growth?  ");
        let request = request.unwrap();
        assert_eq!(
            request.kind,
            RequestKind::Query {
                question: "growth?".to_string()
            }
        );
        let last = state.timeline().last().unwrap();
        assert_eq!(last.role(), ChatRole::User);
        assert_eq!(last.content(), "growth?");
    }

    #[test]
    fn test_stale_query_resolution_is_ignored() {
        let (state, _request) = submit_question(ready_state(), "growth?");
        let before = state.timeline().len();

        let state = resolve(
            state,
            Resolution::Query {
                request_id: RequestId::new("someone-else"),
                outcome: Outcome::Success("12%".to_string()),
            },
        );

        assert!(state.query_in_flight());
        assert_eq!(state.timeline().len(), before);
    }

    #[test]
    fn test_query_failure_keeps_question_visible() {
        let (state, request) = submit_question(ready_state(), "growth?");
        let state = resolve(state, request.unwrap().fail("HTTP 500"));

        let contents: Vec<_> = state.timeline().iter().map(|m| m.content()).collect();
        assert_eq!(contents[contents.len() - 2], "growth?");
        assert_eq!(contents[contents.len() - 1], QUERY_FAILED_NOTICE);
        assert!(!state.query_in_flight());
    }
}

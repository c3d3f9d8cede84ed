//! Session state observed by the presentation layer.

use crate::chat::Timeline;
use crate::document::StagedDocument;
use crate::ids::RequestId;

/// The single mutable record of one session.
///
/// Only the controller and the transition functions mutate it; everything
/// else reads it through the accessors below.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub(crate) timeline: Timeline,
    pub(crate) selected_document: Option<StagedDocument>,
    /// Outstanding ingestion request, if any.
    pub(crate) ingestion_request: Option<RequestId>,
    pub(crate) document_ready: bool,
    /// Outstanding query request, if any.
    pub(crate) query_request: Option<RequestId>,
    pub(crate) draft_input: String,
}

impl SessionState {
    /// Create a fresh session with an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Conversation so far.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Document staged for ingestion, if any.
    pub fn selected_document(&self) -> Option<&StagedDocument> {
        self.selected_document.as_ref()
    }

    /// True between an ingestion dispatch and its resolution.
    pub fn ingestion_in_flight(&self) -> bool {
        self.ingestion_request.is_some()
    }

    /// True once an ingestion has succeeded and no new document was staged since.
    pub fn document_ready(&self) -> bool {
        self.document_ready
    }

    /// True between a query dispatch and its resolution.
    pub fn query_in_flight(&self) -> bool {
        self.query_request.is_some()
    }

    /// Text the user is composing.
    pub fn draft_input(&self) -> &str {
        &self.draft_input
    }

    /// Whether a question could be submitted right now (ignoring its text).
    pub fn can_query(&self) -> bool {
        self.document_ready && !self.query_in_flight()
    }

    /// Whether `begin_ingestion` would dispatch right now.
    pub fn can_ingest(&self) -> bool {
        self.selected_document.is_some() && !self.ingestion_in_flight()
    }
}

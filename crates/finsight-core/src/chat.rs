//! Chat message types and the append-only conversation timeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a message in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChatRole {
    /// Question typed (or picked) by the user.
    User,
    /// Answer, confirmation, or failure notice produced on the user's behalf.
    Assistant,
}

/// A message in the conversation timeline.
///
/// Messages are immutable once created; fields are only readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    role: ChatRole,
    content: String,
    created_at: DateTime<Utc>,
}

impl ChatMessage {
    fn new(role: ChatRole, content: String, created_at: DateTime<Utc>) -> Self {
        Self {
            role,
            content,
            created_at,
        }
    }

    /// Create a user message stamped now.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content.into(), Utc::now())
    }

    /// Create an assistant message stamped now.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content.into(), Utc::now())
    }

    /// Role of this message.
    pub fn role(&self) -> ChatRole {
        self.role
    }

    /// Message text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// When the message was appended.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Ordered, append-only log of conversation messages.
///
/// Insertion order is display order. Timestamps never go backwards: if the
/// wall clock steps back, the new message reuses the previous timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    messages: Vec<ChatMessage>,
}

impl Timeline {
    /// Create an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_user(&mut self, content: impl Into<String>) {
        self.push_at(ChatRole::User, content.into(), Utc::now());
    }

    pub(crate) fn push_assistant(&mut self, content: impl Into<String>) {
        self.push_at(ChatRole::Assistant, content.into(), Utc::now());
    }

    fn push_at(&mut self, role: ChatRole, content: String, now: DateTime<Utc>) {
        let created_at = match self.messages.last() {
            Some(last) if last.created_at > now => last.created_at,
            _ => now,
        };
        self.messages
            .push(ChatMessage::new(role, content, created_at));
    }

    /// All messages in display order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Iterate messages in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, ChatMessage> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Most recently appended message.
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a ChatMessage;
    type IntoIter = std::slice::Iter<'a, ChatMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

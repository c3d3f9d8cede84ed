//! FinSight Core
//!
//! The client-side session state machine for document question answering.
//! This crate has no dependencies on:
//! - Network/HTTP
//! - Terminal rendering
//! - Runtime specifics
//!
//! Backend calls are represented as [`Request`] values handed to a
//! [`Dispatcher`]; their outcomes come back as [`Resolution`] values and are
//! applied by pure transition functions.

pub mod chat;
pub mod controller;
pub mod document;
pub mod error;
pub mod ids;
pub mod notices;
pub mod request;
pub mod session;
pub mod transition;

// Re-export commonly used types
pub use chat::{ChatMessage, ChatRole, Timeline};
pub use controller::{Dispatcher, SessionController};
pub use document::StagedDocument;
pub use error::CoreError;
pub use ids::RequestId;
pub use notices::SUGGESTED_QUESTIONS;
pub use request::{Outcome, Request, RequestKind, Resolution};
pub use session::SessionState;

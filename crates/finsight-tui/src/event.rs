//! Event types for communication between the request runner and the UI.

use finsight_core::{Request, Resolution};

/// Events sent from the background runner to the UI thread.
#[derive(Debug)]
pub enum UiEvent {
    /// A dispatched request finished.
    Resolved(Resolution),

    /// Result of a backend health probe.
    BackendHealth(bool),

    /// A problem worth showing in the status line.
    Error(String),
}

/// Commands sent from the UI to the background runner.
#[derive(Debug)]
pub enum BackendCommand {
    /// Run a request against the backend.
    Dispatch(Request),

    /// Probe the backend's health endpoint.
    CheckHealth,

    /// Quit the application.
    Quit,
}

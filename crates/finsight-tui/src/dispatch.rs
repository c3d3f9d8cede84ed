//! Hands controller requests to the background runner.

use tokio::sync::mpsc::{self, error::TrySendError};

use finsight_core::{CoreError, Dispatcher, Request};

use crate::event::BackendCommand;

/// [`Dispatcher`] that forwards requests over the command channel.
///
/// Never blocks the UI thread: a full or closed channel is reported as a
/// dispatch failure, which the controller resolves on the spot.
pub struct ChannelDispatcher {
    cmd_tx: mpsc::Sender<BackendCommand>,
}

impl ChannelDispatcher {
    pub fn new(cmd_tx: mpsc::Sender<BackendCommand>) -> Self {
        Self { cmd_tx }
    }

    /// Sender for non-request commands (health checks, quit).
    pub fn commands(&self) -> &mpsc::Sender<BackendCommand> {
        &self.cmd_tx
    }
}

impl Dispatcher for ChannelDispatcher {
    fn dispatch(&mut self, request: Request) -> Result<(), CoreError> {
        self.cmd_tx
            .try_send(BackendCommand::Dispatch(request))
            .map_err(|e| match e {
                TrySendError::Full(_) => CoreError::DispatchFailed("runner queue is full".into()),
                TrySendError::Closed(_) => CoreError::DispatchFailed("runner has stopped".into()),
            })
    }
}

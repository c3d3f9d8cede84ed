//! Background request runner.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use finsight_client::{execute, RagBackend};

use crate::event::{BackendCommand, UiEvent};

/// Run the background request loop.
///
/// This function runs in a separate thread with its own tokio runtime.
/// Every dispatched request gets its own task, so an ingestion and a query
/// can be outstanding at the same time. Each one reports back exactly once
/// through `ui_tx`.
pub async fn run_backend(
    backend: Arc<dyn RagBackend>,
    ui_tx: mpsc::Sender<UiEvent>,
    mut cmd_rx: mpsc::Receiver<BackendCommand>,
) {
    info!("Request runner started");

    spawn_health_probe(&backend, &ui_tx);

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            BackendCommand::Dispatch(request) => {
                let backend = Arc::clone(&backend);
                let ui_tx = ui_tx.clone();
                debug!(request_id = %request.id, kind = request.label(), "Running request");

                tokio::spawn(async move {
                    let resolution = execute(backend.as_ref(), request).await;
                    if ui_tx.send(UiEvent::Resolved(resolution)).await.is_err() {
                        debug!("UI gone, dropping resolution");
                    }
                });
            }
            BackendCommand::CheckHealth => {
                spawn_health_probe(&backend, &ui_tx);
            }
            BackendCommand::Quit => {
                info!("Received quit command, shutting down runner");
                break;
            }
        }
    }

    info!("Request runner shutdown complete");
}

fn spawn_health_probe(backend: &Arc<dyn RagBackend>, ui_tx: &mpsc::Sender<UiEvent>) {
    let backend = Arc::clone(backend);
    let ui_tx = ui_tx.clone();

    tokio::spawn(async move {
        match backend.health().await {
            Ok(healthy) => {
                debug!(healthy, "Health check finished");
                let _ = ui_tx.send(UiEvent::BackendHealth(healthy)).await;
            }
            Err(e) => {
                warn!(error = %e, "Health check failed");
                let _ = ui_tx.send(UiEvent::BackendHealth(false)).await;
                let _ = ui_tx
                    .send(UiEvent::Error(format!("Backend unreachable: {}", e)))
                    .await;
            }
        }
    });
}

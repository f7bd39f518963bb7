//! Bridges between the service client and the TUI event loop.
//!
//! Each spawned task owns one request and reports back exclusively through
//! the `AppEvent` channel, stamped with the epoch the request was started
//! under. User-facing failure text stays generic; detail goes to the log.

use std::path::PathBuf;

use tokio::sync::mpsc;

use super::state::EXPORT_ERROR;
use super::types::{AppEvent, StreamPhase};
use crate::api::{ApiClient, ExportRequest, GenerateRequest, RefineRequest, StreamEvent};

/// Start a generation stream and forward its events.
pub fn spawn_generate(
    client: ApiClient,
    request: GenerateRequest,
    epoch: u64,
    tx: mpsc::Sender<AppEvent>,
) {
    let rx = client.stream_generate(&request);
    forward_stream(rx, StreamPhase::Generate, epoch, tx);
}

/// Start a refinement stream and forward its events.
pub fn spawn_refine(
    client: ApiClient,
    request: RefineRequest,
    epoch: u64,
    tx: mpsc::Sender<AppEvent>,
) {
    let rx = client.stream_refine(&request);
    forward_stream(rx, StreamPhase::Refine, epoch, tx);
}

fn forward_stream(
    mut rx: mpsc::Receiver<StreamEvent>,
    phase: StreamPhase,
    epoch: u64,
    tx: mpsc::Sender<AppEvent>,
) {
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let forwarded = match event {
                StreamEvent::Chunk(text) => AppEvent::StreamChunk { epoch, text },
                StreamEvent::Done => AppEvent::StreamDone { epoch },
                StreamEvent::Error(detail) => {
                    tracing::warn!(?phase, %detail, "stream request failed");
                    AppEvent::StreamFailed { epoch, phase }
                }
            };
            if tx.send(forwarded).await.is_err() {
                return;
            }
        }
    });
}

/// Export the document, write the file and report the outcome.
pub fn spawn_export(
    client: ApiClient,
    request: ExportRequest,
    export_dir: PathBuf,
    tx: mpsc::Sender<AppEvent>,
) {
    tokio::spawn(async move {
        let filename = request.format.filename();
        match client.export(&request).await {
            Ok(bytes) => {
                let path = export_dir.join(filename);
                match tokio::fs::write(&path, &bytes).await {
                    Ok(()) => {
                        let _ = tx.send(AppEvent::ExportDone { path }).await;
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), %e, "could not write exported file");
                        let _ = tx.send(AppEvent::ExportFailed(EXPORT_ERROR.to_string())).await;
                    }
                }
            }
            Err(e) => {
                tracing::warn!(%e, "export request failed");
                let _ = tx.send(AppEvent::ExportFailed(EXPORT_ERROR.to_string())).await;
            }
        }
    });
}

//! Streaming HTTP client for the template service.
//!
//! Streaming requests run in a spawned task and hand the response body to the
//! caller chunk by chunk over an mpsc channel, so the UI can re-render while
//! the document is still arriving.

use futures::StreamExt;
use reqwest::{Client, Response};
use thiserror::Error;
use tokio::sync::mpsc;

use super::types::{ExportRequest, GenerateRequest, RefineRequest, StreamEvent};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned status {0}")]
    Status(u16),
}

/// Client for the template service endpoints.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start generating a template. Events arrive on the returned channel.
    pub fn stream_generate(&self, request: &GenerateRequest) -> mpsc::Receiver<StreamEvent> {
        self.stream_request("/generate-template", serde_json::json!(request))
    }

    /// Start refining the current template.
    pub fn stream_refine(&self, request: &RefineRequest) -> mpsc::Receiver<StreamEvent> {
        self.stream_request("/refine-template", serde_json::json!(request))
    }

    /// Export the template and return the file bytes.
    pub async fn export(&self, request: &ExportRequest) -> Result<Vec<u8>, ApiError> {
        let url = format!("{}/export-template", self.base_url);
        let response = self.client.post(&url).json(request).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }

        Ok(response.bytes().await?.to_vec())
    }

    fn stream_request(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> mpsc::Receiver<StreamEvent> {
        let (tx, rx) = mpsc::channel(100);
        let client = self.client.clone();
        let url = format!("{}{}", self.base_url, path);

        tokio::spawn(async move {
            match client.post(&url).json(&body).send().await {
                Ok(response) => {
                    if !response.status().is_success() {
                        let status = response.status().as_u16();
                        let _ = tx
                            .send(StreamEvent::Error(format!("server returned status {status}")))
                            .await;
                        return;
                    }
                    forward_chunks(response, tx).await;
                }
                Err(e) => {
                    let _ = tx.send(StreamEvent::Error(e.to_string())).await;
                }
            }
        });

        rx
    }
}

/// Read the response body incrementally and emit each decoded piece.
///
/// The network layer may split a multi-byte UTF-8 sequence across chunks, so
/// undecodable trailing bytes are carried into the next read.
async fn forward_chunks(response: Response, tx: mpsc::Sender<StreamEvent>) {
    let mut bytes = response.bytes_stream();
    let mut carry: Vec<u8> = Vec::new();

    while let Some(chunk) = bytes.next().await {
        match chunk {
            Ok(bytes) => {
                carry.extend_from_slice(&bytes);
                let text = take_utf8_prefix(&mut carry);
                if !text.is_empty() && tx.send(StreamEvent::Chunk(text)).await.is_err() {
                    return;
                }
            }
            Err(e) => {
                let _ = tx.send(StreamEvent::Error(e.to_string())).await;
                return;
            }
        }
    }

    if !carry.is_empty() {
        // Stream ended mid-sequence; decode what is left lossily.
        let text = String::from_utf8_lossy(&carry).into_owned();
        if tx.send(StreamEvent::Chunk(text)).await.is_err() {
            return;
        }
    }

    let _ = tx.send(StreamEvent::Done).await;
}

/// Split the longest valid UTF-8 prefix out of `carry`.
///
/// An incomplete sequence at the tail stays in `carry` for the next chunk; a
/// byte that can never form a valid sequence is replaced rather than held.
fn take_utf8_prefix(carry: &mut Vec<u8>) -> String {
    match std::str::from_utf8(carry) {
        Ok(text) => {
            let text = text.to_string();
            carry.clear();
            text
        }
        Err(e) if e.error_len().is_none() => {
            let valid = e.valid_up_to();
            let text = String::from_utf8_lossy(&carry[..valid]).into_owned();
            carry.drain(..valid);
            text
        }
        Err(_) => {
            let text = String::from_utf8_lossy(carry).into_owned();
            carry.clear();
            text
        }
    }
}

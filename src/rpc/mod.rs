//! Command RPC transport
//!
//! The device exposes every module through a single command channel: a
//! request names a command, the module it is addressed to and a flat map of
//! parameters. Files travel over a separate upload variant of the same
//! channel. Responses come back in a small envelope that flags errors.

pub mod http;

pub use http::HttpTransport;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

/// Errors raised by a transport
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("command '{command}' failed: {message}")]
    Command { command: String, message: String },

    #[error("malformed response to '{command}': {reason}")]
    Envelope { command: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Flat key/value request parameters
pub type Params = Map<String, Value>;

/// A file selected for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// Name the file is stored under on the device
    pub file_name: String,
    /// Raw file bytes
    pub content: Bytes,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }

    /// Read a file from disk, keeping only its final path component as name.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, RpcError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                RpcError::Transport(format!("not a file path: {}", path.display()))
            })?;
        let content = tokio::fs::read(path).await?;
        Ok(Self::new(file_name, content))
    }

    pub fn is_empty(&self) -> bool {
        self.file_name.is_empty() || self.content.is_empty()
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }
}

/// Request/response primitive used by every remote call.
///
/// Implementations must not retry or cache; the caller sees each failure
/// exactly as the transport produced it.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Send `command` to module `to` and return the response payload.
    async fn send_command(
        &self,
        command: &str,
        to: &str,
        params: Option<Params>,
    ) -> Result<Value, RpcError>;

    /// Upload `file` through the upload variant of `command`.
    async fn upload(&self, command: &str, to: &str, file: UploadFile) -> Result<Value, RpcError>;
}

#[async_trait]
impl<T: RpcTransport + ?Sized> RpcTransport for std::sync::Arc<T> {
    async fn send_command(
        &self,
        command: &str,
        to: &str,
        params: Option<Params>,
    ) -> Result<Value, RpcError> {
        (**self).send_command(command, to, params).await
    }

    async fn upload(&self, command: &str, to: &str, file: UploadFile) -> Result<Value, RpcError> {
        (**self).upload(command, to, file).await
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    error: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Value,
}

/// Unwrap a response envelope into its payload.
///
/// `{"error": true, "message": ...}` becomes [`RpcError::Command`]; anything
/// else yields `data` (`null` when absent).
pub fn decode_envelope(command: &str, raw: Value) -> Result<Value, RpcError> {
    let envelope: Envelope = serde_json::from_value(raw).map_err(|e| RpcError::Envelope {
        command: command.to_string(),
        reason: e.to_string(),
    })?;
    if envelope.error {
        return Err(RpcError::Command {
            command: command.to_string(),
            message: envelope
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "unknown error".to_string()),
        });
    }
    Ok(envelope.data)
}

//! Sounds module control
//!
//! Remote client for the device's `sounds` module, the configuration cache
//! it reloads from, and the controller that keeps a view model in step with
//! the device.

pub mod cache;
pub mod client;
pub mod controller;
pub mod types;

pub use cache::*;
pub use client::*;
pub use controller::*;
pub use types::*;

use thiserror::Error;

use crate::rpc::RpcError;

/// Module identifier every sounds command is addressed to
pub const MODULE: &str = "sounds";

/// Sounds errors
#[derive(Error, Debug)]
pub enum SoundsError {
    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error("missing parameter: {0}")]
    MissingParameter(String),

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("invalid {what} payload: {source}")]
    Decode {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("configuration of module '{0}' unavailable")]
    ConfigUnavailable(String),

    #[error("no upload dialog is open")]
    DialogClosed,
}

/// Result type for sounds operations
pub type Result<T> = std::result::Result<T, SoundsError>;

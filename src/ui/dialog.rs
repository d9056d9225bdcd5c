//! Modal dialog session
//!
//! Tracks the single modal slot: which dialog is open and which upload, if
//! any, it has already acted on.

use serde::Serialize;

use crate::rpc::UploadFile;
use crate::sounds::FileKind;

/// Dialogs the sounds view can open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "dialog", content = "kind", rename_all = "snake_case")]
pub enum DialogKind {
    /// Add a file of the given kind
    Add(FileKind),
    /// Advanced configuration
    Config,
}

/// The one modal slot
#[derive(Debug, Default)]
pub struct DialogSession {
    open: Option<DialogKind>,
    handled: Option<UploadFile>,
}

impl DialogSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `kind`, returning the dialog it superseded.
    pub fn open(&mut self, kind: DialogKind) -> Option<DialogKind> {
        self.handled = None;
        self.open.replace(kind)
    }

    /// Close the slot, returning what was open.
    pub fn close(&mut self) -> Option<DialogKind> {
        self.handled = None;
        self.open.take()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn current(&self) -> Option<DialogKind> {
        self.open
    }

    /// Record `file` as acted on by this session.
    ///
    /// Returns `false` when the same file was already taken, so a repeated
    /// assignment does not trigger a second upload.
    pub fn take_upload(&mut self, file: &UploadFile) -> bool {
        if self.handled.as_ref() == Some(file) {
            return false;
        }
        self.handled = Some(file.clone());
        true
    }
}

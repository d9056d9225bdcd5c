//! sounds-console library
//!
//! Remote control of a device's "sounds" module: a typed client for its
//! command API, and a controller that keeps a view model in step with the
//! device while driving notifications, confirmations and dialogs through
//! pluggable UI handles.

pub mod cli;
pub mod config;
pub mod logging;
pub mod rpc;
pub mod sounds;
pub mod ui;

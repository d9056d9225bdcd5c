//! UI collaborators
//!
//! The controller never draws anything itself. Notifications, confirmation
//! prompts, modal presentation and the global action affordance are reached
//! through these traits so any front end (or a test) can plug in.

pub mod console;
pub mod dialog;

pub use console::*;
pub use dialog::*;

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// Transient notifications
pub trait Notifier: Send + Sync {
    /// Show a loading indicator that stays until replaced or hidden
    fn loading(&self, message: &str);

    fn success(&self, message: &str);

    fn error(&self, message: &str);

    /// Dismiss the current notification
    fn hide(&self);
}

/// Yes/no confirmation
#[async_trait]
pub trait Confirmer: Send + Sync {
    /// Ask the user; `false` means declined.
    async fn confirm(&self, title: &str, ok_label: &str) -> bool;
}

/// Modal presentation
pub trait DialogHost: Send + Sync {
    fn show(&self, dialog: DialogKind);

    fn hide(&self);
}

/// Actions a view contributes to the global action affordance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewAction {
    OpenAddDialog,
    OpenConfigDialog,
}

/// Entry of the global action affordance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextAction {
    pub icon: String,
    pub tooltip: String,
    pub action: ViewAction,
}

impl ContextAction {
    pub fn new(icon: &str, tooltip: &str, action: ViewAction) -> Self {
        Self {
            icon: icon.to_string(),
            tooltip: tooltip.to_string(),
            action,
        }
    }
}

/// Hosting shell that surfaces contextual actions
pub trait ActionHost: Send + Sync {
    fn enable_actions(&self, actions: Vec<ContextAction>);
}

/// Everything a view needs from its host
#[derive(Clone)]
pub struct UiHandles {
    pub notifier: Arc<dyn Notifier>,
    pub confirmer: Arc<dyn Confirmer>,
    pub dialogs: Arc<dyn DialogHost>,
    pub actions: Arc<dyn ActionHost>,
}

impl UiHandles {
    /// Terminal collaborators
    pub fn console(quiet: bool, assume_yes: bool) -> Self {
        Self {
            notifier: Arc::new(ConsoleNotifier::new(quiet)),
            confirmer: Arc::new(ConsoleConfirmer::new(assume_yes)),
            dialogs: Arc::new(LogDialogHost),
            actions: Arc::new(LogActionHost),
        }
    }
}

impl std::fmt::Debug for UiHandles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiHandles").finish_non_exhaustive()
    }
}

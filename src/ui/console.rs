//! Terminal implementations of the UI collaborators

use async_trait::async_trait;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use super::{ActionHost, Confirmer, ContextAction, DialogHost, DialogKind, Notifier};

/// Notifications written to stderr
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    quiet: bool,
}

impl ConsoleNotifier {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Notifier for ConsoleNotifier {
    fn loading(&self, message: &str) {
        debug!(message = message, "loading");
        if !self.quiet {
            eprintln!("... {}", message);
        }
    }

    fn success(&self, message: &str) {
        info!(message = message, "success");
        if !self.quiet {
            eprintln!("ok  {}", message);
        }
    }

    fn error(&self, message: &str) {
        warn!(message = message, "error");
        eprintln!("err {}", message);
    }

    fn hide(&self) {
        debug!("notification dismissed");
    }
}

/// Confirmation read from stdin, or granted up front with `--yes`
#[derive(Debug, Default)]
pub struct ConsoleConfirmer {
    assume_yes: bool,
}

impl ConsoleConfirmer {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

/// Interpret a typed answer; only an explicit yes confirms.
pub fn parse_answer(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
}

#[async_trait]
impl Confirmer for ConsoleConfirmer {
    async fn confirm(&self, title: &str, ok_label: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("{} [{}: y/N] ", title, ok_label);
        let _ = std::io::stderr().flush();

        let mut line = String::new();
        let mut stdin = BufReader::new(tokio::io::stdin());
        match stdin.read_line(&mut line).await {
            Ok(_) => parse_answer(&line),
            Err(e) => {
                warn!(error = %e, "Could not read confirmation");
                false
            }
        }
    }
}

/// Dialog host for a terminal, where dialogs are implicit
#[derive(Debug, Default)]
pub struct LogDialogHost;

impl DialogHost for LogDialogHost {
    fn show(&self, dialog: DialogKind) {
        debug!(dialog = ?dialog, "dialog shown");
    }

    fn hide(&self) {
        debug!("dialog hidden");
    }
}

/// Action host that only records what a view registered
#[derive(Debug, Default)]
pub struct LogActionHost;

impl ActionHost for LogActionHost {
    fn enable_actions(&self, actions: Vec<ContextAction>) {
        for action in &actions {
            debug!(icon = %action.icon, tooltip = %action.tooltip, "action enabled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer() {
        assert!(parse_answer("y\n"));
        assert!(parse_answer("  YES "));
        assert!(!parse_answer("\n"));
        assert!(!parse_answer("no"));
        assert!(!parse_answer("yep"));
    }

    #[test]
    fn test_assume_yes_confirms_without_reading() {
        let confirmer = ConsoleConfirmer::new(true);
        assert!(tokio_test::block_on(confirmer.confirm("Delete sound?", "Delete")));
    }
}

//! Navigation collaborator: performs the terminal redirect.

use std::io::Write;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use launchpad_core::events::NavigationIntent;

use crate::host::HostEvent;

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("redirect to {url} blocked: {reason}")]
    Blocked { url: String, reason: String },
    #[error("failed to write redirect: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode redirect: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Receives the one committed redirect of an interaction.
pub trait Navigator: Send {
    fn navigate(&mut self, intent: &NavigationIntent) -> Result<(), NavigationError>;
}

/// Writes the redirect as a JSON line to stdout.
#[derive(Debug, Default)]
pub struct StdoutNavigator;

impl Navigator for StdoutNavigator {
    fn navigate(&mut self, intent: &NavigationIntent) -> Result<(), NavigationError> {
        let line = serde_json::to_string(&HostEvent::Navigate {
            url: &intent.url,
            body_id: &intent.body_id,
        })?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{line}")?;
        stdout.flush()?;
        Ok(())
    }
}

/// Keeps every redirect in memory. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    log: Arc<Mutex<Vec<NavigationIntent>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intents(&self) -> Vec<NavigationIntent> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, intent: &NavigationIntent) -> Result<(), NavigationError> {
        let mut log = self.log.lock().map_err(|e| NavigationError::Blocked {
            url: intent.url.clone(),
            reason: e.to_string(),
        })?;
        log.push(intent.clone());
        Ok(())
    }
}

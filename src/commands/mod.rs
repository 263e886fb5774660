//! Handlers behind the CLI subcommands.
//!
//! Each handler writes its report to the given writer so tests can capture
//! it; the binary passes stdout.

pub mod classify;
pub mod export;
pub mod init;
pub mod quests;
pub mod record;
pub mod reset;
pub mod status;

use crate::config::RefquestConfig;
use crate::io::JsonStateStore;
use crate::session::RefactoringSession;
use anyhow::{Context as _, Result};
use chrono::{DateTime, Utc};

/// Configuration and state store shared by the stateful commands
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: RefquestConfig,
    pub store: JsonStateStore,
}

impl CommandContext {
    pub fn new(config: RefquestConfig) -> Self {
        let store = JsonStateStore::new(config.storage.resolve_state_dir());
        Self { config, store }
    }

    pub fn load_session(&self, now: DateTime<Utc>) -> Result<RefactoringSession> {
        self.store
            .load_session(&self.config.detection, now)
            .with_context(|| format!("Failed to load state from {}", self.store.dir().display()))
    }

    pub fn save_session(&self, session: &RefactoringSession) -> Result<()> {
        self.store
            .save_session(session)
            .with_context(|| format!("Failed to save state to {}", self.store.dir().display()))
    }
}

//! On-disk state: `player.json` and `quests.json` in one directory.

use super::{ensure_dir, read_file};
use crate::config::DetectionConfig;
use crate::errors::{Error, Result};
use crate::session::RefactoringSession;
use crate::snapshot::{ProgressSnapshot, QuestSnapshot};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const PLAYER_FILE: &str = "player.json";
pub const QUESTS_FILE: &str = "quests.json";

/// JSON snapshots in a state directory.
///
/// Writes go to a sibling temp file first and are renamed into place. Reads
/// never fail on content: a missing file is an empty snapshot, and a file that
/// does not parse is logged and treated as empty.
#[derive(Debug, Clone)]
pub struct JsonStateStore {
    dir: PathBuf,
}

impl JsonStateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn player_path(&self) -> PathBuf {
        self.dir.join(PLAYER_FILE)
    }

    pub fn quests_path(&self) -> PathBuf {
        self.dir.join(QUESTS_FILE)
    }

    pub fn load_progress(&self) -> Result<ProgressSnapshot> {
        load_or_default(&self.player_path())
    }

    pub fn load_quests(&self) -> Result<QuestSnapshot> {
        load_or_default(&self.quests_path())
    }

    pub fn save_progress(&self, snapshot: &ProgressSnapshot) -> Result<()> {
        write_json_atomic(&self.player_path(), snapshot)
    }

    pub fn save_quests(&self, snapshot: &QuestSnapshot) -> Result<()> {
        write_json_atomic(&self.quests_path(), snapshot)
    }

    /// Restore a session from disk; an empty store yields a fresh profile
    pub fn load_session(
        &self,
        config: &DetectionConfig,
        now: DateTime<Utc>,
    ) -> Result<RefactoringSession> {
        let progress = self.load_progress()?;
        let quests = self.load_quests()?;
        RefactoringSession::from_snapshots(config, &progress, &quests, now)
    }

    pub fn save_session(&self, session: &RefactoringSession) -> Result<()> {
        self.save_progress(&session.progress_snapshot())?;
        self.save_quests(&session.quest_snapshot())
    }

    /// Remove both state files; missing files are fine
    pub fn clear(&self) -> Result<()> {
        for path in [self.player_path(), self.quests_path()] {
            match fs::remove_file(&path) {
                Ok(()) => debug!("Removed {}", path.display()),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(Error::io("Failed to remove state file", &path, e)),
            }
        }
        Ok(())
    }
}

fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        debug!("No state file at {}, starting empty", path.display());
        return Ok(T::default());
    }
    let contents = read_file(path)?;
    if contents.trim().is_empty() {
        return Ok(T::default());
    }
    match serde_json::from_str(&contents) {
        Ok(value) => Ok(value),
        Err(e) => {
            warn!(
                "Ignoring unreadable state file {}: {}",
                path.display(),
                e
            );
            Ok(T::default())
        }
    }
}

fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(|e| Error::io("Failed to write state file", &tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| Error::io("Failed to replace state file", path, e))?;
    debug!("Saved {}", path.display());
    Ok(())
}

use crate::dedup::DEFAULT_DEDUP_WINDOW_MS;
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the project-level configuration file
pub const CONFIG_FILE_NAME: &str = ".refquest.toml";

/// Directory used for state when no platform data directory exists
pub const FALLBACK_STATE_DIR: &str = ".refquest";

/// Root configuration structure for refquest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefquestConfig {
    pub detection: DetectionConfig,
    pub notifications: NotificationConfig,
    pub storage: StorageConfig,
}

/// Detection pipeline settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Window inside which a repeated kind in the same file is a duplicate
    #[serde(default = "default_dedup_window_ms")]
    pub dedup_window_ms: u64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            dedup_window_ms: default_dedup_window_ms(),
        }
    }
}

fn default_dedup_window_ms() -> u64 {
    DEFAULT_DEDUP_WINDOW_MS
}

/// Which session events reach the player, and for how long
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_true")]
    pub show_xp_gain: bool,

    #[serde(default = "default_true")]
    pub show_level_up: bool,

    #[serde(default = "default_true")]
    pub show_quest_completed: bool,

    /// How long a host should keep a notification visible
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            show_xp_gain: true,
            show_level_up: true,
            show_quest_completed: true,
            duration_ms: default_duration_ms(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_duration_ms() -> u64 {
    3000
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Where player.json and quests.json live; platform data dir when unset
    #[serde(default)]
    pub state_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Configured directory, else `<data dir>/refquest`, else `./.refquest`
    pub fn resolve_state_dir(&self) -> PathBuf {
        self.state_dir.clone().unwrap_or_else(default_state_dir)
    }
}

pub fn default_state_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("refquest"))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_STATE_DIR))
}

impl RefquestConfig {
    pub fn validate(&self) -> Result<()> {
        if self.notifications.duration_ms == 0 {
            return Err(Error::Config(
                "notifications.duration_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Override the state directory, e.g. from the command line
    pub fn with_state_dir(mut self, dir: Option<&Path>) -> Self {
        if let Some(dir) = dir {
            self.storage.state_dir = Some(dir.to_path_buf());
        }
        self
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}

use std::path::{Path, PathBuf};

use super::core::{RefquestConfig, CONFIG_FILE_NAME};
use crate::errors::Result;
use crate::io;

/// Directories checked from the working directory upward
const MAX_SEARCH_DEPTH: usize = 10;

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// A file was found but could not be used
    Rejected(PathBuf),
    /// No file within the search depth
    Defaults,
}

/// Parse a `.refquest.toml` body and check its values
pub fn parse_and_validate_config(contents: &str) -> Result<RefquestConfig> {
    let config: RefquestConfig = toml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

/// Nearest `.refquest.toml` at or above `start`, looking at most
/// `max_depth` directories up.
pub fn find_config_file(start: &Path, max_depth: usize) -> Option<PathBuf> {
    start
        .ancestors()
        .take(max_depth)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Resolve the configuration for `start`.
///
/// Only the nearest file counts: if it cannot be read or is invalid, the
/// result is the defaults, never a file further up.
pub fn resolve_config_from(start: &Path) -> (RefquestConfig, ConfigSource) {
    let Some(path) = find_config_file(start, MAX_SEARCH_DEPTH) else {
        log::debug!(
            "No {} within {} directories of {}, using defaults",
            CONFIG_FILE_NAME,
            MAX_SEARCH_DEPTH,
            start.display()
        );
        return (RefquestConfig::default(), ConfigSource::Defaults);
    };

    match io::read_file(&path).and_then(|contents| parse_and_validate_config(&contents)) {
        Ok(config) => {
            log::debug!("Loaded config from {}", path.display());
            (config, ConfigSource::File(path))
        }
        Err(e) => {
            log::warn!("Ignoring {}: {}. Using defaults.", path.display(), e);
            (RefquestConfig::default(), ConfigSource::Rejected(path))
        }
    }
}

pub fn load_config_from(start: &Path) -> RefquestConfig {
    resolve_config_from(start).0
}

/// Configuration for the current working directory
pub fn load_config() -> RefquestConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(&dir),
        Err(e) => {
            log::warn!("Cannot determine working directory ({}), using defaults", e);
            RefquestConfig::default()
        }
    }
}

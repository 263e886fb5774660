//! `.refquest.toml` handling.
//!
//! The loader walks up from the working directory and takes the first file it
//! finds. Every section and field is optional; a file that fails to parse or
//! validate is reported and replaced by defaults.

mod core;
mod loader;

pub use self::core::{
    default_state_dir, DetectionConfig, NotificationConfig, RefquestConfig, StorageConfig,
    CONFIG_FILE_NAME, FALLBACK_STATE_DIR,
};
pub use loader::{
    find_config_file, load_config, load_config_from, parse_and_validate_config,
    resolve_config_from, ConfigSource,
};

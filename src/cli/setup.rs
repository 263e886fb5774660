//! Runtime setup for the binary: logging and configuration.

use crate::config::{load_config, RefquestConfig};
use tracing_subscriber::EnvFilter;

/// Default filter for a verbosity count; `RUST_LOG` wins when set
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber; a second call is a no-op
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Load `.refquest.toml` and apply the state directory override
pub fn resolve_config(state_dir: Option<&std::path::Path>) -> RefquestConfig {
    load_config().with_state_dir(state_dir)
}

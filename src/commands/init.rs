use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::io::Write;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# Refquest Configuration

[detection]
# Repeats of the same refactoring in the same file inside this window count once
dedup_window_ms = 500

[notifications]
show_xp_gain = true
show_level_up = true
show_quest_completed = true
duration_ms = 3000

[storage]
# Defaults to the platform data directory
# state_dir = "/path/to/state"
"#;

/// Write a commented default `.refquest.toml` into `dir`
pub fn init_config(dir: &Path, force: bool, out: &mut dyn Write) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if io::file_exists(&config_path) && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG)?;
    writeln!(out, "Created {}", config_path.display())?;

    Ok(())
}

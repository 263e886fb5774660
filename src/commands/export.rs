use super::CommandContext;
use crate::io::{create_writer, ensure_dir, OutputFormat, StatsExport};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Render statistics to `output`, or to `out` when no path is given
pub fn export_stats(
    ctx: &CommandContext,
    format: OutputFormat,
    output: Option<&Path>,
    now: DateTime<Utc>,
    out: &mut dyn Write,
) -> Result<()> {
    let session = ctx.load_session(now)?;
    let stats = StatsExport::from_session(&session, now);

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                ensure_dir(parent)?;
            }
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut file = BufWriter::new(file);
            create_writer(format, Box::new(&mut file)).write_stats(&stats)?;
            file.flush()?;
            writeln!(out, "Exported statistics to {}", path.display())?;
        }
        None => create_writer(format, Box::new(out)).write_stats(&stats)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{at, context};
    use tempfile::TempDir;

    #[test]
    fn test_export_to_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("reports/stats.md");
        let mut out = Vec::new();

        export_stats(
            &context(&dir),
            OutputFormat::Markdown,
            Some(&target),
            at(0),
            &mut out,
        )
        .unwrap();

        let written = std::fs::read_to_string(&target).unwrap();
        assert!(written.starts_with("# 🎮 Refactoring Quest - Statistics"));
        assert!(String::from_utf8(out).unwrap().starts_with("Exported statistics to"));
    }

    #[test]
    fn test_export_csv_to_writer() {
        let dir = TempDir::new().unwrap();
        let mut out = Vec::new();
        export_stats(&context(&dir), OutputFormat::Csv, None, at(0), &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("Metric,Value\n"));
    }
}

use super::CommandContext;
use crate::io::{create_writer, OutputFormat, StatsExport};
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::io::Write;

pub fn show_status(
    ctx: &CommandContext,
    format: OutputFormat,
    now: DateTime<Utc>,
    out: &mut dyn Write,
) -> Result<()> {
    let session = ctx.load_session(now)?;
    let stats = StatsExport::from_session(&session, now);
    create_writer(format, Box::new(out)).write_stats(&stats)
}

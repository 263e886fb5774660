use super::CommandContext;
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::io::Write;

/// Clear XP and history, and optionally re-seed the quests
pub fn reset_profile(
    ctx: &CommandContext,
    quests: bool,
    now: DateTime<Utc>,
    out: &mut dyn Write,
) -> Result<()> {
    let session = ctx.load_session(now)?;
    session.reset_progress();
    if quests {
        session.reset_quests(now)?;
    }
    ctx.save_session(&session)?;

    writeln!(
        out,
        "Progress reset{}",
        if quests { ", quests restored to the starter set" } else { "" }
    )?;
    Ok(())
}

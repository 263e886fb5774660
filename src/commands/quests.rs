use super::CommandContext;
use crate::io::writers::terminal::progress_bar;
use crate::quests::Quest;
use anyhow::Result;
use chrono::{DateTime, Utc};
use colored::*;
use std::io::Write;

pub fn list_quests(
    ctx: &CommandContext,
    completed: bool,
    now: DateTime<Utc>,
    out: &mut dyn Write,
) -> Result<()> {
    let session = ctx.load_session(now)?;
    let quests = if completed {
        session.completed_quests()
    } else {
        session.active_quests()
    };

    if quests.is_empty() {
        writeln!(
            out,
            "No {} quests",
            if completed { "completed" } else { "active" }
        )?;
        return Ok(());
    }
    for quest in &quests {
        write_quest(quest, out)?;
    }
    Ok(())
}

fn write_quest(quest: &Quest, out: &mut dyn Write) -> Result<()> {
    writeln!(
        out,
        "{} {} {} [{}] {} XP",
        quest.category.icon(),
        quest.title.bold(),
        quest.difficulty.stars(),
        quest.status.id(),
        quest.xp_reward()
    )?;
    if !quest.description.is_empty() {
        writeln!(out, "   {}", quest.description)?;
    }
    for objective in &quest.objectives {
        writeln!(
            out,
            "   {} {} {}/{}",
            progress_bar(objective.progress()),
            objective.description,
            objective.current_count.min(objective.target_count),
            objective.target_count
        )?;
    }
    if let Some(done) = quest.completed_at {
        writeln!(out, "   completed {}", done.format("%Y-%m-%d %H:%M"))?;
    }
    Ok(())
}

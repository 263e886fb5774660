use crate::io::output::{OutputWriter, StatsExport};
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use std::io::Write;

const BAR_WIDTH: usize = 20;

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_stats(&mut self, stats: &StatsExport) -> anyhow::Result<()> {
        let progress = &stats.progress;

        writeln!(self.writer, "{}", "═══════════════════════════════════════════".cyan())?;
        writeln!(
            self.writer,
            "  {} {}",
            progress.tier.emoji(),
            progress.title.bold().cyan()
        )?;
        writeln!(self.writer, "{}", "═══════════════════════════════════════════".cyan())?;
        writeln!(
            self.writer,
            "Level {}  {}  {} / {} XP",
            progress.level.to_string().bold(),
            progress_bar(progress.level_progress),
            progress.total_xp,
            progress.xp_for_next_level
        )?;
        writeln!(self.writer, "Actions: {}", progress.action_count)?;
        writeln!(self.writer)?;

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Category", "Actions", "XP", "Avg XP", "Most Used"]);
        for cat in progress.category_stats.values() {
            table.add_row(vec![
                format!("{} {}", cat.category.icon(), cat.category.display_name()),
                cat.action_count.to_string(),
                cat.total_xp.to_string(),
                format!("{:.1}", cat.average_xp()),
                cat.most_frequent_kind
                    .map(|kind| kind.display_name().to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;

        writeln!(
            self.writer,
            "📜 Quests: {} active, {} completed",
            stats.active_quests.len().to_string().yellow(),
            stats.completed_quests.len().to_string().green()
        )?;
        Ok(())
    }
}

/// Fixed-width bar for a fraction in `[0, 1]`
pub fn progress_bar(fraction: f64) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!(
        "[{}{}]",
        "█".repeat(filled).green(),
        "░".repeat(BAR_WIDTH - filled)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::writers::fixtures::sample_export;

    #[test]
    fn test_progress_bar_bounds() {
        colored::control::set_override(false);
        assert_eq!(progress_bar(0.0), format!("[{}]", "░".repeat(BAR_WIDTH)));
        assert_eq!(progress_bar(1.5), format!("[{}]", "█".repeat(BAR_WIDTH)));
        assert_eq!(progress_bar(0.5).matches('█').count(), BAR_WIDTH / 2);
    }

    #[test]
    fn test_terminal_output_mentions_every_category() {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        TerminalWriter::new(&mut buffer)
            .write_stats(&sample_export())
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        for name in ["Code Structure", "Logic & Complexity"] {
            assert!(text.contains(name), "missing {name}");
        }
        assert!(text.contains("Refactoring Apprentice"));
        assert!(text.contains("1 completed"));
    }
}

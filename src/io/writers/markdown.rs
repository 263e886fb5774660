use crate::io::output::{OutputWriter, StatsExport};
use std::io::Write;

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_stats(&mut self, stats: &StatsExport) -> anyhow::Result<()> {
        self.write_header(stats)?;
        self.write_profile(stats)?;
        self.write_categories(stats)?;
        self.write_quests(stats)?;
        self.write_top_kinds(stats)?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, stats: &StatsExport) -> anyhow::Result<()> {
        writeln!(self.writer, "# 🎮 Refactoring Quest - Statistics")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "**Export date:** {}",
            stats.export_date.format("%Y-%m-%d %H:%M UTC")
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_profile(&mut self, stats: &StatsExport) -> anyhow::Result<()> {
        let progress = &stats.progress;
        writeln!(self.writer, "## 👤 Profile")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "- **Title:** {} {}",
            progress.tier.emoji(),
            progress.title
        )?;
        writeln!(
            self.writer,
            "- **Level:** {} - {}",
            progress.level,
            progress.tier.name()
        )?;
        writeln!(self.writer, "- **Total XP:** {}", progress.total_xp)?;
        writeln!(
            self.writer,
            "- **Next level:** {} XP to go",
            progress.xp_to_next_level()
        )?;
        writeln!(
            self.writer,
            "- **Actions performed:** {}",
            progress.action_count
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_categories(&mut self, stats: &StatsExport) -> anyhow::Result<()> {
        writeln!(self.writer, "## 📊 Statistics by Category")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Category | Actions | Total XP | Avg XP | Most Used |")?;
        writeln!(self.writer, "|----------|---------|----------|--------|-----------|")?;
        for cat in stats.progress.category_stats.values() {
            writeln!(
                self.writer,
                "| {} {} | {} | {} | {:.2} | {} |",
                cat.category.icon(),
                cat.category.display_name(),
                cat.action_count,
                cat.total_xp,
                cat.average_xp(),
                cat.most_frequent_kind
                    .map(|kind| kind.display_name())
                    .unwrap_or("N/A")
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_quests(&mut self, stats: &StatsExport) -> anyhow::Result<()> {
        writeln!(self.writer, "## 📜 Quests")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "- **Active:** {}", stats.active_quests.len())?;
        writeln!(self.writer, "- **Completed:** {}", stats.completed_quests.len())?;
        for quest in &stats.completed_quests {
            writeln!(self.writer, "  - ✅ {} (+{} XP)", quest.title, quest.xp_reward())?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_top_kinds(&mut self, stats: &StatsExport) -> anyhow::Result<()> {
        writeln!(self.writer, "## 🏆 Top {} Actions", stats.top_kinds.len())?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Rank | Action | Count |")?;
        writeln!(self.writer, "|------|--------|-------|")?;
        for (rank, (kind, count)) in stats.top_kinds.iter().enumerate() {
            writeln!(
                self.writer,
                "| {} | {} {} | {} |",
                rank + 1,
                kind.gameplay_tag(),
                kind.display_name(),
                count
            )?;
        }
        Ok(())
    }
}

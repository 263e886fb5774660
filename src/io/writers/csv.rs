use crate::io::output::{OutputWriter, StatsExport};
use std::io::Write;

/// Metric/value table followed by the recent action log
pub struct CsvWriter<W: Write> {
    writer: W,
}

impl<W: Write> CsvWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_metric(&mut self, metric: &str, value: impl std::fmt::Display) -> anyhow::Result<()> {
        writeln!(self.writer, "{},{}", escape(metric), escape(&value.to_string()))?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for CsvWriter<W> {
    fn write_stats(&mut self, stats: &StatsExport) -> anyhow::Result<()> {
        let progress = &stats.progress;
        writeln!(self.writer, "Metric,Value")?;
        self.write_metric("Level", progress.level)?;
        self.write_metric("Total XP", progress.total_xp)?;
        self.write_metric("Title", progress.title)?;
        self.write_metric("Total Actions", progress.action_count)?;
        self.write_metric("Active Quests", stats.active_quests.len())?;
        self.write_metric("Completed Quests", stats.completed_quests.len())?;

        for cat in progress.category_stats.values() {
            let name = cat.category.display_name();
            self.write_metric(&format!("{name} - Actions"), cat.action_count)?;
            self.write_metric(&format!("{name} - XP"), cat.total_xp)?;
            self.write_metric(&format!("{name} - Avg XP"), format!("{:.2}", cat.average_xp()))?;
            if let Some(kind) = cat.most_frequent_kind {
                self.write_metric(&format!("{name} - Most Used"), kind.display_name())?;
            }
        }

        writeln!(self.writer)?;
        writeln!(self.writer, "Recent Actions")?;
        writeln!(self.writer, "Timestamp,Action,XP,File")?;
        for action in &stats.recent_actions {
            writeln!(
                self.writer,
                "{},{},{},{}",
                action.timestamp.to_rfc3339(),
                escape(action.kind.display_name()),
                action.xp_reward(),
                escape(action.origin_file.as_deref().unwrap_or(""))
            )?;
        }
        Ok(())
    }
}

/// Quote a field when it holds a separator, quote or line break
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::writers::fixtures::sample_export;

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_csv_export_sections() {
        let mut buffer = Vec::new();
        CsvWriter::new(&mut buffer).write_stats(&sample_export()).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.starts_with("Metric,Value\nLevel,1\nTotal XP,137\n"));
        assert!(text.contains("Code Structure - Most Used,Rename\n"));
        assert!(text.contains("\nRecent Actions\nTimestamp,Action,XP,File\n"));
        let action_rows = text
            .lines()
            .skip_while(|line| *line != "Timestamp,Action,XP,File")
            .skip(1)
            .count();
        assert_eq!(action_rows, 5);
        assert!(text.contains(",Extract Method,10,A.kt\n"));
    }
}

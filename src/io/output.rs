use super::writers::{CsvWriter, JsonWriter, MarkdownWriter, TerminalWriter};
use crate::core::{DetectedAction, RefactoringKind};
use crate::progression::{top_kinds, PlayerProgress};
use crate::quests::Quest;
use crate::session::RefactoringSession;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use std::str::FromStr;

/// Actions listed in CSV exports
pub const RECENT_ACTIONS_LIMIT: usize = 50;
/// Kinds ranked in Markdown and terminal exports
pub const TOP_KINDS_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
    Markdown,
    Terminal,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "terminal" => Ok(OutputFormat::Terminal),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}

pub trait OutputWriter {
    fn write_stats(&mut self, stats: &StatsExport) -> anyhow::Result<()>;
}

pub fn create_writer<'a>(format: OutputFormat, writer: Box<dyn Write + 'a>) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Csv => Box::new(CsvWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}

/// Everything an export renders, captured once from a session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsExport {
    pub export_date: DateTime<Utc>,
    pub progress: PlayerProgress,
    pub active_quests: Vec<Quest>,
    pub completed_quests: Vec<Quest>,
    pub recent_actions: Vec<DetectedAction>,
    pub top_kinds: Vec<(RefactoringKind, usize)>,
}

impl StatsExport {
    pub fn from_session(session: &RefactoringSession, export_date: DateTime<Utc>) -> Self {
        let (snapshot, history) = session.snapshot_with_history();
        let start = history.len().saturating_sub(RECENT_ACTIONS_LIMIT);
        Self {
            export_date,
            progress: snapshot.progress,
            active_quests: snapshot.active_quests,
            completed_quests: snapshot.completed_quests,
            top_kinds: top_kinds(&history, TOP_KINDS_LIMIT),
            recent_actions: history[start..].to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DetectionConfig;
    use crate::core::RawDetection;
    use std::sync::Arc;
    use std::thread;

    fn at(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_700_000_000_000 + ms).unwrap()
    }

    #[test]
    fn test_export_is_consistent_under_concurrent_writes() {
        let session = Arc::new(RefactoringSession::new(&DetectionConfig::default(), at(0)).unwrap());
        let writer = {
            let session = Arc::clone(&session);
            thread::spawn(move || {
                for i in 0..400 {
                    let id = if i % 2 == 0 { "Rename" } else { "SafeDelete" };
                    let raw = RawDetection::new(id).in_file(format!("F{i}.kt"));
                    session.handle(&raw, at(i));
                }
            })
        };

        for _ in 0..200 {
            let export = StatsExport::from_session(&session, at(0));
            let counted: usize = export.top_kinds.iter().map(|(_, count)| count).sum();
            assert_eq!(counted, export.progress.action_count);
            assert_eq!(
                export.recent_actions.len(),
                export.progress.action_count.min(RECENT_ACTIONS_LIMIT)
            );
        }
        writer.join().unwrap();

        let export = StatsExport::from_session(&session, at(0));
        assert_eq!(export.progress.action_count, 400);
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("md".parse::<OutputFormat>(), Ok(OutputFormat::Markdown));
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}

use super::CommandContext;
use crate::core::{DetectionSource, RawDetection};
use crate::io::ConsoleNotifier;
use crate::session::HandleOutcome;
use anyhow::Result;
use chrono::{DateTime, Utc};
use colored::*;
use std::io::Write;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct RecordRequest {
    pub raw_id: String,
    pub file: Option<String>,
    pub element: Option<String>,
    pub source: DetectionSource,
}

impl RecordRequest {
    fn to_detection(&self) -> RawDetection {
        RawDetection {
            raw_id: self.raw_id.clone(),
            origin_file: self.file.clone(),
            element_hint: self.element.clone(),
            source: self.source,
        }
    }
}

/// Feed one detection through a session restored from disk.
///
/// Notifications go to stderr per the `[notifications]` settings; the
/// outcome summary goes to `out`. State is saved only when something changed.
pub fn record_detection(
    ctx: &CommandContext,
    request: &RecordRequest,
    now: DateTime<Utc>,
    out: &mut dyn Write,
) -> Result<HandleOutcome> {
    let session = ctx.load_session(now)?;
    session.subscribe(Arc::new(ConsoleNotifier::stderr(
        ctx.config.notifications.clone(),
    )));

    let outcome = session.handle(&request.to_detection(), now);
    match &outcome {
        HandleOutcome::Unrecognized => {
            writeln!(out, "{} is not a known refactoring", request.raw_id.yellow())?;
        }
        HandleOutcome::Duplicate(kind) => {
            writeln!(out, "{} already counted", kind.display_name())?;
        }
        HandleOutcome::Accepted(accepted) => {
            ctx.save_session(&session)?;
            writeln!(
                out,
                "Recorded {} (+{} XP), total {} XP, level {}",
                accepted.action.kind.display_name().green(),
                accepted.xp_gained,
                accepted.progress.total_xp,
                accepted.progress.level
            )?;
        }
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{at, context};
    use tempfile::TempDir;

    fn request(id: &str) -> RecordRequest {
        RecordRequest {
            raw_id: id.to_string(),
            file: Some("Main.kt".to_string()),
            element: None,
            source: DetectionSource::Unspecified,
        }
    }

    #[test]
    fn test_record_persists_accepted_actions() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        let mut out = Vec::new();

        let outcome = record_detection(&ctx, &request("refactoring.extractMethod"), at(0), &mut out).unwrap();
        assert!(outcome.is_accepted());

        let session = ctx.load_session(at(1)).unwrap();
        assert_eq!(session.total_xp(), 10);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_unrecognized_id_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        let mut out = Vec::new();

        let outcome = record_detection(&ctx, &request("EditorCopy"), at(0), &mut out).unwrap();
        assert_eq!(outcome, HandleOutcome::Unrecognized);
        assert!(!ctx.store.player_path().exists());
    }
}

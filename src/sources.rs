//! Adapters from host event shapes to [`RawDetection`].
//!
//! A host may watch several things at once: structured refactoring events,
//! generic user actions and finished commands. Each becomes one
//! [`HostEvent`] impl; the session only ever sees `RawDetection`. When two
//! sources report the same operation, the dedup gate in the session drops the
//! second report.

use crate::core::{DetectionSource, RawDetection};
use crate::session::{HandleOutcome, RefactoringSession};
use chrono::{DateTime, Utc};
use tracing::debug;

/// File extensions whose refactorings the structured event source reports
pub const NATIVE_EXTENSIONS: &[&str] = &[
    "java", "js", "jsx", "ts", "tsx", "py", "php", "rb", "go", "html", "htm", "css", "scss",
    "sass", "xml",
];

/// Language names whose refactorings the structured event source reports
pub const NATIVE_LANGUAGES: &[&str] = &[
    "JAVA",
    "JavaScript",
    "TypeScript",
    "Python",
    "PHP",
    "Ruby",
    "Go",
    "HTML",
    "CSS",
    "XML",
];

/// What a host event means for the session
#[derive(Debug, Clone, PartialEq)]
pub enum Translation {
    Detect(RawDetection),
    Undo(String),
    /// Nothing to report; the reason is only logged
    Skip(&'static str),
}

pub trait HostEvent {
    fn translate(&self) -> Translation;
}

/// Lifecycle callbacks of a structured refactoring engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefactoringEvent {
    Started {
        refactoring_id: String,
    },
    Done {
        refactoring_id: String,
        file_name: Option<String>,
        element_text: Option<String>,
    },
    ConflictsDetected {
        refactoring_id: String,
    },
    Undone {
        refactoring_id: String,
    },
}

impl HostEvent for RefactoringEvent {
    fn translate(&self) -> Translation {
        match self {
            RefactoringEvent::Done {
                refactoring_id,
                file_name,
                element_text,
            } => Translation::Detect(RawDetection {
                raw_id: refactoring_id.clone(),
                origin_file: file_name.clone(),
                element_hint: element_text.clone(),
                source: DetectionSource::RefactoringEvent,
            }),
            RefactoringEvent::Undone { refactoring_id } => {
                Translation::Undo(refactoring_id.clone())
            }
            RefactoringEvent::Started { .. } => Translation::Skip("refactoring not finished yet"),
            RefactoringEvent::ConflictsDetected { .. } => {
                Translation::Skip("refactoring reported conflicts")
            }
        }
    }
}

/// A generic editor action, as reported after it ran
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserActionEvent {
    pub action_id: String,
    pub file_name: Option<String>,
    pub file_extension: Option<String>,
    pub language: Option<String>,
    pub element_text: Option<String>,
}

impl UserActionEvent {
    pub fn new(action_id: impl Into<String>) -> Self {
        Self {
            action_id: action_id.into(),
            ..Default::default()
        }
    }

    /// Whether the structured event source already reports this file's refactorings
    pub fn is_natively_covered(&self) -> bool {
        let by_extension = self
            .file_extension
            .as_deref()
            .is_some_and(|ext| NATIVE_EXTENSIONS.contains(&ext));
        let by_language = self
            .language
            .as_deref()
            .is_some_and(|lang| NATIVE_LANGUAGES.contains(&lang));
        by_extension || by_language
    }
}

impl HostEvent for UserActionEvent {
    fn translate(&self) -> Translation {
        if self.is_natively_covered() {
            return Translation::Skip("covered by the refactoring event source");
        }
        Translation::Detect(RawDetection {
            raw_id: self.action_id.clone(),
            origin_file: self.file_name.clone(),
            element_hint: self.element_text.clone(),
            source: DetectionSource::UserAction,
        })
    }
}

/// An undoable command finished; only its name is known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEvent {
    pub command_name: String,
}

impl HostEvent for CommandEvent {
    fn translate(&self) -> Translation {
        if self.command_name.trim().is_empty() {
            return Translation::Skip("unnamed command");
        }
        Translation::Detect(
            RawDetection::new(self.command_name.clone()).from_source(DetectionSource::Command),
        )
    }
}

/// Translate a host event and hand it to the session.
///
/// Returns the session's verdict, or `None` when the event carried nothing to
/// record (skipped events and undo notifications).
pub fn forward<E: HostEvent + ?Sized>(
    session: &RefactoringSession,
    event: &E,
    now: DateTime<Utc>,
) -> Option<HandleOutcome> {
    match event.translate() {
        Translation::Detect(detection) => Some(session.handle(&detection, now)),
        Translation::Undo(raw_id) => {
            session.on_undo(&raw_id);
            None
        }
        Translation::Skip(reason) => {
            debug!("Host event skipped: {}", reason);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DetectionConfig;
    use crate::core::RefactoringKind;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_700_000_000_000).unwrap()
    }

    #[test]
    fn test_refactoring_done_becomes_detection() {
        let event = RefactoringEvent::Done {
            refactoring_id: "refactoring.extractMethod".into(),
            file_name: Some("Main.java".into()),
            element_text: Some("compute".into()),
        };
        let Translation::Detect(raw) = event.translate() else {
            panic!("expected a detection");
        };
        assert_eq!(raw.source, DetectionSource::RefactoringEvent);
        assert_eq!(raw.origin_file.as_deref(), Some("Main.java"));
    }

    #[test]
    fn test_started_and_conflicts_are_skipped() {
        let started = RefactoringEvent::Started {
            refactoring_id: "refactoring.rename".into(),
        };
        assert!(matches!(started.translate(), Translation::Skip(_)));
        let conflicts = RefactoringEvent::ConflictsDetected {
            refactoring_id: "refactoring.rename".into(),
        };
        assert!(matches!(conflicts.translate(), Translation::Skip(_)));
    }

    #[test]
    fn test_user_actions_skip_native_files() {
        let mut event = UserActionEvent::new("ExtractMethod");
        event.file_extension = Some("ts".into());
        assert!(event.is_natively_covered());

        event.file_extension = Some("kt".into());
        assert!(!event.is_natively_covered());

        event.language = Some("Python".into());
        assert!(event.is_natively_covered());
    }

    #[test]
    fn test_blank_command_is_skipped() {
        let event = CommandEvent {
            command_name: "  ".into(),
        };
        assert_eq!(event.translate(), Translation::Skip("unnamed command"));
    }

    #[test]
    fn test_two_sources_for_one_operation_count_once() {
        let session = RefactoringSession::new(&DetectionConfig::default(), now()).unwrap();
        let structured = RefactoringEvent::Done {
            refactoring_id: "refactoring.extractMethod".into(),
            file_name: Some("Main.kt".into()),
            element_text: None,
        };
        let mut generic = UserActionEvent::new("ExtractMethod");
        generic.file_name = Some("Main.kt".into());
        generic.file_extension = Some("kt".into());

        let first = forward(&session, &structured, now()).unwrap();
        let second = forward(&session, &generic, now() + chrono::Duration::milliseconds(40)).unwrap();

        assert!(first.is_accepted());
        assert_eq!(second, HandleOutcome::Duplicate(RefactoringKind::ExtractMethod));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_undo_is_forwarded_without_outcome() {
        let session = RefactoringSession::new(&DetectionConfig::default(), now()).unwrap();
        let event = RefactoringEvent::Undone {
            refactoring_id: "refactoring.rename".into(),
        };
        assert_eq!(forward(&session, &event, now()), None);
    }
}

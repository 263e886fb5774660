use super::kind::{ActionCategory, RefactoringKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of characters kept from an element hint
pub const MAX_ELEMENT_HINT_CHARS: usize = 50;

/// Sentinel used in place of a missing origin file
pub const UNKNOWN_ORIGIN: &str = "unknown";

/// An accepted, classified refactoring detection.
///
/// Created once per accepted detection and appended to the session history.
/// Never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedAction {
    pub kind: RefactoringKind,
    pub timestamp: DateTime<Utc>,
    pub origin_file: Option<String>,
    pub element_hint: Option<String>,
}

impl DetectedAction {
    pub fn new(kind: RefactoringKind, timestamp: DateTime<Utc>) -> Self {
        Self {
            kind,
            timestamp,
            origin_file: None,
            element_hint: None,
        }
    }

    pub fn with_origin_file(mut self, origin_file: Option<&str>) -> Self {
        self.origin_file = origin_file.map(str::to_string);
        self
    }

    /// Attach an element hint, truncated to [`MAX_ELEMENT_HINT_CHARS`]
    pub fn with_element_hint(mut self, element_hint: Option<&str>) -> Self {
        self.element_hint = element_hint.map(truncate_hint);
        self
    }

    pub fn xp_reward(&self) -> u32 {
        self.kind.base_xp()
    }

    pub fn category(&self) -> ActionCategory {
        self.kind.category()
    }
}

fn truncate_hint(hint: &str) -> String {
    hint.chars().take(MAX_ELEMENT_HINT_CHARS).collect()
}

/// Which kind of host facility reported a detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DetectionSource {
    /// Structured refactoring events (refactoring id plus affected element)
    RefactoringEvent,
    /// Generic user actions (action ids fired from menus and shortcuts)
    UserAction,
    /// Finished undoable commands (command display names)
    Command,
    #[default]
    Unspecified,
}

/// A raw, unclassified detection as reported by a host source.
///
/// Every host source is adapted into this one message shape before it
/// reaches [`crate::session::RefactoringSession::handle`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawDetection {
    pub raw_id: String,
    pub origin_file: Option<String>,
    pub element_hint: Option<String>,
    pub source: DetectionSource,
}

impl RawDetection {
    pub fn new(raw_id: impl Into<String>) -> Self {
        Self {
            raw_id: raw_id.into(),
            ..Self::default()
        }
    }

    pub fn in_file(mut self, origin_file: impl Into<String>) -> Self {
        self.origin_file = Some(origin_file.into());
        self
    }

    pub fn with_element(mut self, element_hint: impl Into<String>) -> Self {
        self.element_hint = Some(element_hint.into());
        self
    }

    pub fn from_source(mut self, source: DetectionSource) -> Self {
        self.source = source;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_hint_is_truncated_by_chars() {
        let long = "é".repeat(80);
        let action = DetectedAction::new(RefactoringKind::Rename, Utc::now()).with_element_hint(Some(&long));
        assert_eq!(action.element_hint.unwrap().chars().count(), MAX_ELEMENT_HINT_CHARS);
    }

    #[test]
    fn test_short_hint_is_kept_verbatim() {
        let action =
            DetectedAction::new(RefactoringKind::Rename, Utc::now()).with_element_hint(Some("fooBar"));
        assert_eq!(action.element_hint.as_deref(), Some("fooBar"));
    }

    #[test]
    fn test_action_reports_kind_metadata() {
        let action = DetectedAction::new(RefactoringKind::BreakCyclicDependency, Utc::now());
        assert_eq!(action.xp_reward(), 25);
        assert_eq!(action.category(), ActionCategory::Coupling);
    }

    #[test]
    fn test_raw_detection_builder() {
        let raw = RawDetection::new("refactoring.rename")
            .in_file("Main.kt")
            .with_element("oldName")
            .from_source(DetectionSource::RefactoringEvent);
        assert_eq!(raw.origin_file.as_deref(), Some("Main.kt"));
        assert_eq!(raw.element_hint.as_deref(), Some("oldName"));
        assert_eq!(raw.source, DetectionSource::RefactoringEvent);
    }
}

//! Objective-to-action matching.
//!
//! Every objective carries an explicit [`ObjectiveTarget`]. Quests authored by
//! description alone (and older persisted quests without a target) resolve it
//! through [`DESCRIPTION_TARGETS`], an ordered phrase table, with the kind
//! display names as a fallback. No free-form string search happens at match
//! time.

use crate::core::{RefactoringKind, KIND_TABLE};
use serde::{Deserialize, Serialize};

/// What an objective counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "kind", rename_all = "snake_case")]
pub enum ObjectiveTarget {
    /// Any accepted refactoring
    AnyRefactoring,
    /// Only actions of this kind
    Kind(RefactoringKind),
}

impl ObjectiveTarget {
    pub fn matches(self, kind: RefactoringKind) -> bool {
        match self {
            ObjectiveTarget::AnyRefactoring => true,
            ObjectiveTarget::Kind(target) => target == kind,
        }
    }
}

/// Description phrases (lowercase) and the target they denote, first match wins
pub static DESCRIPTION_TARGETS: &[(&str, ObjectiveTarget)] = &[
    ("refactoring", ObjectiveTarget::AnyRefactoring),
    ("rename", ObjectiveTarget::Kind(RefactoringKind::Rename)),
    ("extract method", ObjectiveTarget::Kind(RefactoringKind::ExtractMethod)),
    ("extract class", ObjectiveTarget::Kind(RefactoringKind::ExtractClass)),
    ("move method", ObjectiveTarget::Kind(RefactoringKind::MoveMethod)),
    ("optimize imports", ObjectiveTarget::Kind(RefactoringKind::OptimizeImports)),
    ("reformat", ObjectiveTarget::Kind(RefactoringKind::ReformatCode)),
];

/// Resolve the target an objective description denotes
pub fn target_for_description(description: &str) -> Option<ObjectiveTarget> {
    let lowered = description.to_lowercase();

    DESCRIPTION_TARGETS
        .iter()
        .find(|(phrase, _)| lowered.contains(phrase))
        .map(|(_, target)| *target)
        .or_else(|| {
            KIND_TABLE
                .iter()
                .find(|entry| lowered.contains(&entry.display_name.to_lowercase()))
                .map(|entry| ObjectiveTarget::Kind(entry.kind))
        })
}

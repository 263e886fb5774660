//! Serializable snapshots exchanged with the persistence layer.
//!
//! Every field is a primitive (strings, integers, epoch milliseconds) so any
//! plain format can store them. Restoring is tolerant: a record naming an
//! unknown kind, category, difficulty or status, or a quest whose fields
//! contradict each other, is skipped with a warning and the rest still loads.

use crate::core::{DetectedAction, RefactoringKind};
use crate::errors::{Error, Result};
use crate::quests::{
    target_for_description, ObjectiveTarget, Quest, QuestCategory, QuestDifficulty, QuestEngine,
    QuestObjective, QuestStatus,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Persisted id for [`ObjectiveTarget::AnyRefactoring`]
pub const ANY_REFACTORING_ID: &str = "ANY";

/// XP total and action history
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressSnapshot {
    pub total_xp: u64,
    pub action_history: Vec<PersistedAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedAction {
    pub kind_id: String,
    pub timestamp_millis: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_hint: Option<String>,
}

impl ProgressSnapshot {
    pub fn capture(total_xp: u64, history: &[DetectedAction]) -> Self {
        Self {
            total_xp,
            action_history: history.iter().map(PersistedAction::from).collect(),
        }
    }

    /// Total XP and the decodable part of the history
    pub fn restore(&self) -> (u64, Vec<DetectedAction>) {
        let history = self
            .action_history
            .iter()
            .filter_map(|persisted| match persisted.to_action() {
                Ok(action) => Some(action),
                Err(e) => {
                    warn!(
                        "Skipping persisted action at {}: {}",
                        persisted.timestamp_millis, e
                    );
                    None
                }
            })
            .collect();
        (self.total_xp, history)
    }
}

impl From<&DetectedAction> for PersistedAction {
    fn from(action: &DetectedAction) -> Self {
        Self {
            kind_id: action.kind.id().to_string(),
            timestamp_millis: action.timestamp.timestamp_millis(),
            origin_file: action.origin_file.clone(),
            element_hint: action.element_hint.clone(),
        }
    }
}

impl PersistedAction {
    fn to_action(&self) -> Result<DetectedAction> {
        let kind = RefactoringKind::from_id(&self.kind_id)
            .ok_or_else(|| Error::unknown_kind(&self.kind_id))?;
        let timestamp = DateTime::from_timestamp_millis(self.timestamp_millis).ok_or_else(|| {
            Error::InvalidRecord(format!("timestamp {} out of range", self.timestamp_millis))
        })?;
        Ok(
            DetectedAction::new(kind, timestamp)
                .with_origin_file(self.origin_file.as_deref())
                .with_element_hint(self.element_hint.as_deref()),
        )
    }
}

/// Active and completed quests
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestSnapshot {
    pub active_quests: Vec<PersistedQuest>,
    pub completed_quests: Vec<PersistedQuest>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedQuest {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub xp_reward: u32,
    pub difficulty: String,
    pub status: String,
    pub objectives: Vec<PersistedObjective>,
    pub created_at: Option<i64>,
    pub completed_at: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedObjective {
    pub description: String,
    /// Kind id, [`ANY_REFACTORING_ID`], or absent to resolve from the description
    pub target: Option<String>,
    pub target_count: u32,
    pub current_count: u32,
}

impl QuestSnapshot {
    pub fn capture(engine: &QuestEngine) -> Self {
        Self {
            active_quests: engine.active_quests().iter().map(PersistedQuest::from).collect(),
            completed_quests: engine
                .completed_quests()
                .iter()
                .map(PersistedQuest::from)
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.active_quests.is_empty() && self.completed_quests.is_empty()
    }

    /// Rebuild the quest registry; an empty result seeds the starter quests.
    ///
    /// Records land in the collection their status says they belong to,
    /// whichever list they were stored in.
    pub fn restore(&self, now: DateTime<Utc>) -> Result<QuestEngine> {
        let (completed, active): (Vec<Quest>, Vec<Quest>) = self
            .active_quests
            .iter()
            .chain(self.completed_quests.iter())
            .filter_map(|persisted| match persisted.to_quest(now) {
                Ok(quest) => Some(quest),
                Err(e) => {
                    warn!("Skipping persisted quest '{}': {}", persisted.id, e);
                    None
                }
            })
            .partition(|quest| quest.status == QuestStatus::Completed);

        QuestEngine::from_parts(dedupe_ids(active), dedupe_ids(completed), now)
    }
}

fn dedupe_ids(quests: Vec<Quest>) -> Vec<Quest> {
    let mut seen = std::collections::HashSet::new();
    quests
        .into_iter()
        .filter(|quest| {
            let fresh = seen.insert(quest.id.clone());
            if !fresh {
                warn!("Skipping duplicate persisted quest '{}'", quest.id);
            }
            fresh
        })
        .collect()
}

impl From<&Quest> for PersistedQuest {
    fn from(quest: &Quest) -> Self {
        Self {
            id: quest.id.clone(),
            title: quest.title.clone(),
            description: quest.description.clone(),
            category: quest.category.id().to_string(),
            xp_reward: quest.base_xp_reward,
            difficulty: quest.difficulty.id().to_string(),
            status: quest.status.id().to_string(),
            objectives: quest
                .objectives
                .iter()
                .map(|objective| PersistedObjective {
                    description: objective.description.clone(),
                    target: Some(target_id(objective.target).to_string()),
                    target_count: objective.target_count,
                    current_count: objective.current_count,
                })
                .collect(),
            created_at: Some(quest.created_at.timestamp_millis()),
            completed_at: quest.completed_at.map(|at| at.timestamp_millis()),
        }
    }
}

fn target_id(target: ObjectiveTarget) -> &'static str {
    match target {
        ObjectiveTarget::AnyRefactoring => ANY_REFACTORING_ID,
        ObjectiveTarget::Kind(kind) => kind.id(),
    }
}

impl PersistedObjective {
    fn to_objective(&self) -> Result<QuestObjective> {
        let target = match self.target.as_deref() {
            Some(ANY_REFACTORING_ID) => ObjectiveTarget::AnyRefactoring,
            Some(id) => RefactoringKind::from_id(id)
                .map(ObjectiveTarget::Kind)
                .ok_or_else(|| Error::unknown_kind(id))?,
            None => target_for_description(&self.description).ok_or_else(|| {
                Error::InvalidRecord(format!("no target for objective '{}'", self.description))
            })?,
        };

        Ok(QuestObjective {
            description: self.description.clone(),
            target,
            target_count: self.target_count,
            current_count: self.current_count,
        })
    }
}

impl PersistedQuest {
    fn to_quest(&self, now: DateTime<Utc>) -> Result<Quest> {
        let invalid = |reason: String| Error::invalid_quest(&self.id, reason);
        let category = QuestCategory::from_id(&self.category)
            .ok_or_else(|| invalid(format!("unknown category '{}'", self.category)))?;
        let difficulty = QuestDifficulty::from_id(&self.difficulty)
            .ok_or_else(|| invalid(format!("unknown difficulty '{}'", self.difficulty)))?;
        let status = QuestStatus::from_id(&self.status)
            .ok_or_else(|| invalid(format!("unknown status '{}'", self.status)))?;
        let objectives = self
            .objectives
            .iter()
            .map(PersistedObjective::to_objective)
            .collect::<Result<Vec<_>>>()?;

        let quest = Quest {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            category,
            base_xp_reward: self.xp_reward,
            difficulty,
            objectives,
            status,
            created_at: self
                .created_at
                .and_then(DateTime::from_timestamp_millis)
                .unwrap_or(now),
            completed_at: self.completed_at.and_then(DateTime::from_timestamp_millis),
        };
        quest.validate()?;
        Ok(quest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn at(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_700_000_000_000 + ms).unwrap()
    }

    #[test]
    fn test_progress_snapshot_skips_unknown_kinds() {
        let snapshot = ProgressSnapshot {
            total_xp: 42,
            action_history: vec![
                PersistedAction {
                    kind_id: "RENAME".into(),
                    timestamp_millis: 1,
                    ..Default::default()
                },
                PersistedAction {
                    kind_id: "TELEPORT".into(),
                    timestamp_millis: 2,
                    ..Default::default()
                },
            ],
        };
        let (total_xp, history) = snapshot.restore();
        assert_eq!(total_xp, 42);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].kind, RefactoringKind::Rename);
    }

    #[test]
    fn test_undecodable_action_reports_why() {
        let unknown = PersistedAction {
            kind_id: "TELEPORT".into(),
            ..Default::default()
        };
        assert!(matches!(unknown.to_action(), Err(Error::UnknownKind(id)) if id == "TELEPORT"));

        let out_of_range = PersistedAction {
            kind_id: "RENAME".into(),
            timestamp_millis: i64::MAX,
            ..Default::default()
        };
        assert!(matches!(out_of_range.to_action(), Err(Error::InvalidRecord(_))));
    }

    #[test]
    fn test_action_fields_survive_capture() {
        let action = DetectedAction::new(RefactoringKind::ExtractMethod, at(5))
            .with_origin_file(Some("Main.kt"))
            .with_element_hint(Some("compute"));
        let snapshot = ProgressSnapshot::capture(10, std::slice::from_ref(&action));
        let (_, history) = snapshot.restore();
        assert_eq!(history, vec![action]);
    }

    #[test]
    fn test_quest_snapshot_skips_unknown_enum_values() {
        let engine = QuestEngine::with_starter_quests(at(0)).unwrap();
        let mut snapshot = QuestSnapshot::capture(&engine);
        let total = snapshot.active_quests.len();
        snapshot.active_quests[0].difficulty = "LEGENDARY".into();

        let restored = snapshot.restore(at(1)).unwrap();
        assert_eq!(restored.active_quests().len(), total - 1);
    }

    #[test]
    fn test_quest_snapshot_skips_contradictory_records() {
        let engine = QuestEngine::with_starter_quests(at(0)).unwrap();
        let mut snapshot = QuestSnapshot::capture(&engine);
        let total = snapshot.active_quests.len();
        snapshot.active_quests[1].status = "COMPLETED".into();

        let restored = snapshot.restore(at(1)).unwrap();
        assert_eq!(restored.active_quests().len(), total - 1);
        assert!(restored.completed_quests().is_empty());
    }

    #[test]
    fn test_empty_quest_snapshot_reseeds() {
        let restored = QuestSnapshot::default().restore(at(0)).unwrap();
        assert!(restored.contains("first-steps"));
    }

    #[test]
    fn test_missing_target_resolves_from_description() {
        let objective = PersistedObjective {
            description: "Extract Method × 5".into(),
            target: None,
            target_count: 5,
            current_count: 2,
        };
        let restored = objective.to_objective().unwrap();
        assert_eq!(restored.target, ObjectiveTarget::Kind(RefactoringKind::ExtractMethod));
        assert_eq!(restored.current_count, 2);
    }

    #[test]
    fn test_quest_capture_restore_keeps_statuses() {
        let mut engine = QuestEngine::with_starter_quests(at(0)).unwrap();
        for i in 0..5 {
            engine.on_action(&DetectedAction::new(RefactoringKind::Rename, at(i)));
        }
        let restored = QuestSnapshot::capture(&engine).restore(at(100)).unwrap();
        assert_eq!(restored.active_quests(), engine.active_quests());
        assert_eq!(restored.completed_quests(), engine.completed_quests());
    }
}

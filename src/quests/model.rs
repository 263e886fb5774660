use super::matching::{target_for_description, ObjectiveTarget};
use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Thematic grouping of quests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestCategory {
    Refactoring,
    Testing,
    Cleanup,
    Design,
    Daily,
}

impl QuestCategory {
    pub const ALL: [QuestCategory; 5] = [
        QuestCategory::Refactoring,
        QuestCategory::Testing,
        QuestCategory::Cleanup,
        QuestCategory::Design,
        QuestCategory::Daily,
    ];

    pub fn id(self) -> &'static str {
        match self {
            QuestCategory::Refactoring => "REFACTORING",
            QuestCategory::Testing => "TESTING",
            QuestCategory::Cleanup => "CLEANUP",
            QuestCategory::Design => "DESIGN",
            QuestCategory::Daily => "DAILY",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.id() == id)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            QuestCategory::Refactoring => "Refactoring",
            QuestCategory::Testing => "Testing",
            QuestCategory::Cleanup => "Cleanup",
            QuestCategory::Design => "Architecture",
            QuestCategory::Daily => "Daily",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            QuestCategory::Refactoring => "♻️",
            QuestCategory::Testing => "🧪",
            QuestCategory::Cleanup => "🧹",
            QuestCategory::Design => "🏗️",
            QuestCategory::Daily => "📅",
        }
    }
}

/// Difficulty scales the quest's base XP reward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestDifficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl QuestDifficulty {
    pub const ALL: [QuestDifficulty; 4] = [
        QuestDifficulty::Easy,
        QuestDifficulty::Medium,
        QuestDifficulty::Hard,
        QuestDifficulty::Expert,
    ];

    pub fn id(self) -> &'static str {
        match self {
            QuestDifficulty::Easy => "EASY",
            QuestDifficulty::Medium => "MEDIUM",
            QuestDifficulty::Hard => "HARD",
            QuestDifficulty::Expert => "EXPERT",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|difficulty| difficulty.id() == id)
    }

    /// Always at least 1.0
    pub fn xp_multiplier(self) -> f64 {
        match self {
            QuestDifficulty::Easy => 1.0,
            QuestDifficulty::Medium => 1.5,
            QuestDifficulty::Hard => 2.0,
            QuestDifficulty::Expert => 3.0,
        }
    }

    pub fn stars(self) -> &'static str {
        match self {
            QuestDifficulty::Easy => "⭐",
            QuestDifficulty::Medium => "⭐⭐",
            QuestDifficulty::Hard => "⭐⭐⭐",
            QuestDifficulty::Expert => "⭐⭐⭐⭐",
        }
    }
}

/// Quest lifecycle. `Completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestStatus {
    Available,
    InProgress,
    Completed,
}

impl QuestStatus {
    pub fn id(self) -> &'static str {
        match self {
            QuestStatus::Available => "AVAILABLE",
            QuestStatus::InProgress => "IN_PROGRESS",
            QuestStatus::Completed => "COMPLETED",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        [
            QuestStatus::Available,
            QuestStatus::InProgress,
            QuestStatus::Completed,
        ]
        .into_iter()
        .find(|status| status.id() == id)
    }
}

/// A single countable sub-goal of a quest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestObjective {
    pub description: String,
    pub target: ObjectiveTarget,
    pub target_count: u32,
    pub current_count: u32,
}

impl QuestObjective {
    pub fn new(description: impl Into<String>, target: ObjectiveTarget, target_count: u32) -> Self {
        Self {
            description: description.into(),
            target,
            target_count,
            current_count: 0,
        }
    }

    /// Build an objective whose target is looked up from its description
    pub fn described(description: impl Into<String>, target_count: u32) -> Result<Self> {
        let description = description.into();
        let target = target_for_description(&description).ok_or_else(|| {
            Error::invalid_quest(
                description.clone(),
                "objective description names no known refactoring",
            )
        })?;
        Ok(Self::new(description, target, target_count))
    }

    pub fn is_completed(&self) -> bool {
        self.current_count >= self.target_count
    }

    pub fn progress(&self) -> f64 {
        if self.target_count == 0 {
            return 0.0;
        }
        (f64::from(self.current_count) / f64::from(self.target_count)).min(1.0)
    }
}

/// A quest and its objective state.
///
/// Only [`super::QuestEngine`] produces modified copies; callers see clones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: QuestCategory,
    pub base_xp_reward: u32,
    pub difficulty: QuestDifficulty,
    pub objectives: Vec<QuestObjective>,
    pub status: QuestStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Quest {
    pub fn builder(title: impl Into<String>) -> QuestBuilder {
        QuestBuilder::new(title)
    }

    /// Non-empty and every objective reached
    pub fn all_objectives_completed(&self) -> bool {
        !self.objectives.is_empty() && self.objectives.iter().all(QuestObjective::is_completed)
    }

    /// Share of objectives completed
    pub fn progress(&self) -> f64 {
        if self.objectives.is_empty() {
            return 0.0;
        }
        let done = self.objectives.iter().filter(|o| o.is_completed()).count();
        done as f64 / self.objectives.len() as f64
    }

    /// XP granted on completion: `round(base * multiplier)`
    pub fn xp_reward(&self) -> u64 {
        (f64::from(self.base_xp_reward) * self.difficulty.xp_multiplier()).round() as u64
    }

    pub fn is_active(&self) -> bool {
        self.status != QuestStatus::Completed
    }

    /// Status, completion stamp and objectives agree with each other
    pub fn validate(&self) -> Result<()> {
        if self.objectives.is_empty() {
            return Err(Error::invalid_quest(&self.id, "quest has no objectives"));
        }
        if self.objectives.iter().any(|o| o.target_count == 0) {
            return Err(Error::invalid_quest(&self.id, "objective target must be positive"));
        }
        let completed = self.status == QuestStatus::Completed;
        if completed != self.completed_at.is_some() {
            return Err(Error::invalid_quest(
                &self.id,
                "completion timestamp does not match status",
            ));
        }
        if completed != self.all_objectives_completed() {
            return Err(Error::invalid_quest(
                &self.id,
                "objective progress does not match status",
            ));
        }
        Ok(())
    }

    /// Available with every counter at zero
    pub fn is_fresh(&self) -> bool {
        self.status == QuestStatus::Available
            && self.completed_at.is_none()
            && self.objectives.iter().all(|o| o.current_count == 0)
    }
}

/// Assembles a fresh, validated [`Quest`]
#[derive(Debug, Clone)]
pub struct QuestBuilder {
    id: Option<String>,
    title: String,
    description: String,
    category: QuestCategory,
    base_xp_reward: u32,
    difficulty: QuestDifficulty,
    objectives: Vec<QuestObjective>,
}

impl QuestBuilder {
    fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: String::new(),
            category: QuestCategory::Refactoring,
            base_xp_reward: 0,
            difficulty: QuestDifficulty::Easy,
            objectives: Vec::new(),
        }
    }

    /// Use a stable id instead of a random UUID
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn category(mut self, category: QuestCategory) -> Self {
        self.category = category;
        self
    }

    pub fn reward(mut self, base_xp_reward: u32, difficulty: QuestDifficulty) -> Self {
        self.base_xp_reward = base_xp_reward;
        self.difficulty = difficulty;
        self
    }

    pub fn objective(mut self, objective: QuestObjective) -> Self {
        self.objectives.push(objective);
        self
    }

    /// Fails when there are no objectives or a target count is zero
    pub fn build(self, created_at: DateTime<Utc>) -> Result<Quest> {
        let id = self.id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        if self.objectives.is_empty() {
            return Err(Error::invalid_quest(id, "a quest needs at least one objective"));
        }
        if let Some(objective) = self.objectives.iter().find(|o| o.target_count == 0) {
            return Err(Error::invalid_quest(
                id,
                format!("objective '{}' has a zero target", objective.description),
            ));
        }

        Ok(Quest {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
            base_xp_reward: self.base_xp_reward,
            difficulty: self.difficulty,
            objectives: self
                .objectives
                .into_iter()
                .map(|objective| QuestObjective {
                    current_count: 0,
                    ..objective
                })
                .collect(),
            status: QuestStatus::Available,
            created_at,
            completed_at: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RefactoringKind;

    fn objective(count: u32) -> QuestObjective {
        QuestObjective::new("Extract Method × 5", ObjectiveTarget::Kind(RefactoringKind::ExtractMethod), count)
    }

    #[test]
    fn test_builder_rejects_empty_objectives() {
        let err = Quest::builder("Nothing").build(Utc::now()).unwrap_err();
        assert!(matches!(err, Error::InvalidQuest { .. }));
    }

    #[test]
    fn test_builder_rejects_zero_target() {
        let err = Quest::builder("Zero")
            .objective(objective(0))
            .build(Utc::now())
            .unwrap_err();
        assert!(err.to_string().contains("zero target"));
    }

    #[test]
    fn test_builder_generates_uuid_and_fresh_state() {
        let quest = Quest::builder("Extract Expert")
            .reward(200, QuestDifficulty::Medium)
            .objective(objective(5))
            .build(Utc::now())
            .unwrap();
        assert!(uuid::Uuid::parse_str(&quest.id).is_ok());
        assert!(quest.is_fresh());
        assert!(quest.validate().is_ok());
        assert_eq!(quest.xp_reward(), 300);
    }

    #[test]
    fn test_xp_reward_rounds() {
        let quest = Quest::builder("Odd")
            .reward(125, QuestDifficulty::Medium)
            .objective(objective(1))
            .build(Utc::now())
            .unwrap();
        // 187.5 rounds half away from zero
        assert_eq!(quest.xp_reward(), 188);
    }

    #[test]
    fn test_validate_catches_status_mismatch() {
        let mut quest = Quest::builder("Broken")
            .id("broken")
            .objective(objective(1))
            .build(Utc::now())
            .unwrap();
        quest.status = QuestStatus::Completed;
        assert!(quest.validate().is_err());
    }

    #[test]
    fn test_empty_objective_list_is_never_complete() {
        let mut quest = Quest::builder("Vacuous")
            .objective(objective(1))
            .build(Utc::now())
            .unwrap();
        quest.objectives.clear();
        assert!(!quest.all_objectives_completed());
        assert_eq!(quest.progress(), 0.0);
    }

    #[test]
    fn test_described_objective_uses_table() {
        let objective = QuestObjective::described("Rename 10 elements", 10).unwrap();
        assert_eq!(objective.target, ObjectiveTarget::Kind(RefactoringKind::Rename));
        assert!(QuestObjective::described("Juggle", 1).is_err());
    }

    #[test]
    fn test_enum_ids_round_trip() {
        for category in QuestCategory::ALL {
            assert_eq!(QuestCategory::from_id(category.id()), Some(category));
        }
        for difficulty in QuestDifficulty::ALL {
            assert_eq!(QuestDifficulty::from_id(difficulty.id()), Some(difficulty));
            assert!(difficulty.xp_multiplier() >= 1.0);
        }
        assert_eq!(QuestStatus::from_id("IN_PROGRESS"), Some(QuestStatus::InProgress));
        assert_eq!(QuestStatus::from_id("ABANDONED"), None);
    }
}

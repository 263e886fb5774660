use super::model::{Quest, QuestCategory, QuestDifficulty, QuestStatus};
use super::starter::starter_quests;
use crate::core::DetectedAction;
use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

/// A quest that just reached `Completed`, with the XP it grants
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestCompletion {
    pub quest: Quest,
    pub xp_awarded: u64,
}

/// What one action did to the quest registry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestUpdate {
    /// Ids of active quests whose objectives moved
    pub advanced: Vec<String>,
    pub completed: Vec<QuestCompletion>,
}

impl QuestUpdate {
    pub fn is_empty(&self) -> bool {
        self.advanced.is_empty() && self.completed.is_empty()
    }

    pub fn xp_awarded(&self) -> u64 {
        self.completed.iter().map(|c| c.xp_awarded).sum()
    }
}

/// Registry of active and completed quests.
///
/// Active quests are replaced by id when they advance; completed quests move
/// to their own collection and are never touched again.
#[derive(Debug, Clone, Default)]
pub struct QuestEngine {
    active: Vec<Quest>,
    completed: Vec<Quest>,
}

impl QuestEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine seeded with the starter quests
    pub fn with_starter_quests(now: DateTime<Utc>) -> Result<Self> {
        let mut engine = Self::new();
        engine.seed_starter_quests(now)?;
        Ok(engine)
    }

    /// Rebuild from previously validated collections, seeding when both are empty
    pub fn from_parts(active: Vec<Quest>, completed: Vec<Quest>, now: DateTime<Utc>) -> Result<Self> {
        if active.is_empty() && completed.is_empty() {
            debug!("No quests to restore, seeding starter quests");
            return Self::with_starter_quests(now);
        }
        Ok(Self { active, completed })
    }

    fn seed_starter_quests(&mut self, now: DateTime<Utc>) -> Result<()> {
        for quest in starter_quests(now)? {
            self.add_quest(quest)?;
        }
        Ok(())
    }

    /// Register a fresh quest at the end of the active list
    pub fn add_quest(&mut self, quest: Quest) -> Result<()> {
        quest.validate()?;
        if !quest.is_fresh() {
            return Err(Error::invalid_quest(
                &quest.id,
                "new quests must be available with zero progress",
            ));
        }
        if self.contains(&quest.id) {
            return Err(Error::DuplicateQuest(quest.id));
        }
        self.active.push(quest);
        Ok(())
    }

    /// Count the action against every matching objective of every active quest
    pub fn on_action(&mut self, action: &DetectedAction) -> QuestUpdate {
        let mut update = QuestUpdate::default();
        let mut still_active = Vec::with_capacity(self.active.len());

        for quest in std::mem::take(&mut self.active) {
            match advance(&quest, action) {
                None => still_active.push(quest),
                Some(advanced) if advanced.status == QuestStatus::Completed => {
                    let xp_awarded = advanced.xp_reward();
                    info!(
                        "Quest completed: {} (+{} XP)",
                        advanced.title, xp_awarded
                    );
                    update.advanced.push(advanced.id.clone());
                    self.completed.push(advanced.clone());
                    update.completed.push(QuestCompletion {
                        quest: advanced,
                        xp_awarded,
                    });
                }
                Some(advanced) => {
                    update.advanced.push(advanced.id.clone());
                    still_active.push(advanced);
                }
            }
        }

        self.active = still_active;
        update
    }

    pub fn active_quests(&self) -> &[Quest] {
        &self.active
    }

    pub fn completed_quests(&self) -> &[Quest] {
        &self.completed
    }

    pub fn get(&self, id: &str) -> Option<&Quest> {
        self.active
            .iter()
            .chain(self.completed.iter())
            .find(|quest| quest.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn quests_by_category(&self, category: QuestCategory) -> Vec<&Quest> {
        self.active.iter().filter(|q| q.category == category).collect()
    }

    pub fn quests_by_difficulty(&self, difficulty: QuestDifficulty) -> Vec<&Quest> {
        self.active.iter().filter(|q| q.difficulty == difficulty).collect()
    }

    /// Drop every quest and start over with the starter set
    pub fn reset(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.active.clear();
        self.completed.clear();
        self.seed_starter_quests(now)
    }
}

/// Next version of `quest` after `action`, or `None` when nothing changed.
fn advance(quest: &Quest, action: &DetectedAction) -> Option<Quest> {
    if !quest.is_active() {
        return None;
    }

    let mut next = quest.clone();
    let mut touched = false;
    for objective in next.objectives.iter_mut() {
        // Saturates at the target so a finished objective stays finished.
        if objective.target.matches(action.kind) && !objective.is_completed() {
            objective.current_count += 1;
            touched = true;
        }
    }
    if !touched {
        return None;
    }

    if next.all_objectives_completed() {
        next.status = QuestStatus::Completed;
        next.completed_at = Some(action.timestamp);
    } else if next.status == QuestStatus::Available {
        next.status = QuestStatus::InProgress;
    }
    Some(next)
}

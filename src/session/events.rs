//! Notifications fanned out to session listeners.

use crate::core::DetectedAction;
use crate::progression::PlayerProgress;
use crate::quests::{Quest, QuestCompletion};
use serde::Serialize;

/// A level transition, possibly spanning several levels at once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelUp {
    pub from: u32,
    pub to: u32,
    pub title: &'static str,
}

/// Consistent read-only view of the whole session after a mutation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    /// Increments with every state change; later snapshots have larger values
    pub revision: u64,
    pub progress: PlayerProgress,
    pub active_quests: Vec<Quest>,
    pub completed_quests: Vec<Quest>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// An action passed classification and deduplication
    ActionRecorded { action: DetectedAction, xp_gained: u32 },
    QuestCompleted(QuestCompletion),
    LevelUp(LevelUp),
    /// Sent once per state change, after the discrete events above
    StateChanged(Box<SessionSnapshot>),
}

impl SessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::ActionRecorded { .. } => "action_recorded",
            SessionEvent::QuestCompleted(_) => "quest_completed",
            SessionEvent::LevelUp(_) => "level_up",
            SessionEvent::StateChanged(_) => "state_changed",
        }
    }
}

/// Subscriber to session events.
///
/// Called outside the session lock with immutable data. Errors and panics are
/// caught and logged per listener; they never reach the session or other
/// listeners.
pub trait SessionListener: Send + Sync {
    fn on_event(&self, event: &SessionEvent) -> anyhow::Result<()>;
}

impl<F> SessionListener for F
where
    F: Fn(&SessionEvent) -> anyhow::Result<()> + Send + Sync,
{
    fn on_event(&self, event: &SessionEvent) -> anyhow::Result<()> {
        self(event)
    }
}

/// Handle returned by [`super::RefactoringSession::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

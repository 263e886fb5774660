//! Quest model and the quest state machine.
//!
//! `Available --(matching action)--> InProgress --(all objectives)--> Completed`
//!
//! A quest completes only when it has at least one objective and every
//! objective has reached its target; construction rejects empty objective
//! lists so the vacuous case never arises.

pub mod engine;
pub mod matching;
pub mod model;
pub mod starter;

pub use engine::{QuestCompletion, QuestEngine, QuestUpdate};
pub use matching::{target_for_description, ObjectiveTarget, DESCRIPTION_TARGETS};
pub use model::{
    Quest, QuestBuilder, QuestCategory, QuestDifficulty, QuestObjective, QuestStatus,
};
pub use starter::starter_quests;

// Export modules for library usage
pub mod classifier;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod dedup;
pub mod errors;
pub mod io;
pub mod progression;
pub mod quests;
pub mod session;
pub mod snapshot;
pub mod sources;

// Re-export commonly used types
pub use crate::core::{
    ActionCategory, DetectedAction, DetectionSource, KindInfo, RawDetection, RefactoringKind,
    KIND_TABLE,
};

pub use crate::classifier::{classify, classify_detailed, looks_like_refactoring, Classification};

pub use crate::dedup::DeduplicationGate;

pub use crate::progression::{
    aggregate, level_for, title_for, xp_threshold, CategoryStats, LevelTier, PlayerProgress,
    MAX_LEVEL,
};

pub use crate::quests::{
    starter_quests, ObjectiveTarget, Quest, QuestCategory, QuestDifficulty, QuestEngine,
    QuestObjective, QuestStatus,
};

pub use crate::session::{
    AcceptedAction, HandleOutcome, LevelUp, RefactoringSession, SessionEvent, SessionListener,
    SessionSnapshot,
};

pub use crate::snapshot::{ProgressSnapshot, QuestSnapshot};

pub use crate::config::{load_config, RefquestConfig};

pub use crate::errors::{Error, Result};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};

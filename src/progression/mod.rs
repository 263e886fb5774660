//! Level and XP derivation plus history rollups.
//!
//! Everything here is a pure function of `(total_xp, history)`; the session
//! owns the inputs and calls [`PlayerProgress::compute`] whenever it needs a
//! fresh snapshot.

pub mod level;
pub mod stats;

pub use level::{level_for, title_for, xp_threshold, LevelTier, MAX_LEVEL};
pub use stats::{aggregate, top_kinds, CategoryStats};

use crate::core::{ActionCategory, DetectedAction};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Read-only view of a player's progression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerProgress {
    pub total_xp: u64,
    pub level: u32,
    /// XP earned since reaching the current level
    pub current_level_xp: u64,
    /// Cumulative XP at which the next level is reached
    pub xp_for_next_level: u64,
    /// Fraction of the way to the next level, in `[0, 1]`
    pub level_progress: f64,
    pub title: &'static str,
    pub tier: LevelTier,
    pub action_count: usize,
    pub last_action_at: Option<DateTime<Utc>>,
    pub category_stats: BTreeMap<ActionCategory, CategoryStats>,
}

impl PlayerProgress {
    pub fn compute(total_xp: u64, history: &[DetectedAction]) -> Self {
        let level = level_for(total_xp);
        let level_floor = xp_threshold(level);
        let xp_for_next_level = xp_threshold(level.saturating_add(1));
        let current_level_xp = total_xp - level_floor;
        let span = xp_for_next_level.saturating_sub(level_floor);
        let level_progress = if span > 0 {
            (current_level_xp as f64 / span as f64).clamp(0.0, 1.0)
        } else {
            // Only at MAX_LEVEL, where there is no next level.
            1.0
        };

        Self {
            total_xp,
            level,
            current_level_xp,
            xp_for_next_level,
            level_progress,
            title: title_for(level),
            tier: LevelTier::for_level(level),
            action_count: history.len(),
            last_action_at: history.iter().map(|action| action.timestamp).max(),
            category_stats: aggregate(history),
        }
    }

    /// XP still missing before the next level
    pub fn xp_to_next_level(&self) -> u64 {
        self.xp_for_next_level.saturating_sub(self.total_xp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RefactoringKind;

    #[test]
    fn test_fresh_profile() {
        let progress = PlayerProgress::compute(0, &[]);
        assert_eq!(progress.level, 1);
        assert_eq!(progress.current_level_xp, 0);
        assert_eq!(progress.xp_for_next_level, 282);
        assert_eq!(progress.level_progress, 0.0);
        assert_eq!(progress.title, "Refactoring Apprentice");
        assert!(progress.last_action_at.is_none());
    }

    #[test]
    fn test_mid_level_progress() {
        // Level 2 spans 282..519.
        let progress = PlayerProgress::compute(400, &[]);
        assert_eq!(progress.level, 2);
        assert_eq!(progress.current_level_xp, 118);
        assert_eq!(progress.xp_to_next_level(), 119);
        assert!((progress.level_progress - 118.0 / 237.0).abs() < 1e-9);
    }

    #[test]
    fn test_capped_level_is_full() {
        let progress = PlayerProgress::compute(u64::MAX, &[]);
        assert_eq!(progress.level, MAX_LEVEL);
        assert_eq!(progress.level_progress, 1.0);
        assert_eq!(progress.xp_to_next_level(), 0);
        assert_eq!(progress.tier, LevelTier::Legend);
    }

    #[test]
    fn test_last_action_is_latest_timestamp() {
        let early = DateTime::from_timestamp_millis(1_000).unwrap();
        let late = DateTime::from_timestamp_millis(5_000).unwrap();
        let history = vec![
            DetectedAction::new(RefactoringKind::Rename, late),
            DetectedAction::new(RefactoringKind::Rename, early),
        ];
        let progress = PlayerProgress::compute(10, &history);
        assert_eq!(progress.last_action_at, Some(late));
        assert_eq!(progress.action_count, 2);
    }
}

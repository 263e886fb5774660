//! Level curve: XP thresholds, level lookup, titles and tiers.

use serde::{Deserialize, Serialize};

/// Cumulative XP needed to reach `level`.
///
/// `0` for levels up to 1, otherwise `floor(100 * level^1.5)`. Strictly
/// increasing from level 2 on.
///
/// Evaluated as `isqrt(10_000 * level^3)` so perfect squares land exactly on
/// their integer value instead of one below it.
pub fn xp_threshold(level: u32) -> u64 {
    if level <= 1 {
        return 0;
    }
    let level = u128::from(level);
    let threshold = (10_000 * level * level * level).isqrt();
    u64::try_from(threshold).unwrap_or(u64::MAX)
}

/// Highest level [`level_for`] reports; larger totals stay here
pub const MAX_LEVEL: u32 = u32::MAX;

/// Highest level whose threshold does not exceed `total_xp`.
///
/// Scans upward from level 1 with doubling strides until a threshold passes
/// `total_xp`, then bisects the last stride. Always returns at least 1 and at
/// most [`MAX_LEVEL`].
pub fn level_for(total_xp: u64) -> u32 {
    // Invariant: xp_threshold(low) <= total_xp.
    let mut low = 1u32;
    let mut stride = 1u32;
    let mut high = loop {
        let probe = low.saturating_add(stride);
        if xp_threshold(probe) > total_xp {
            break probe;
        }
        if probe == MAX_LEVEL {
            return MAX_LEVEL;
        }
        low = probe;
        stride = stride.saturating_mul(2);
    };
    while high - low > 1 {
        let mid = low + (high - low) / 2;
        if xp_threshold(mid) <= total_xp {
            low = mid;
        } else {
            high = mid;
        }
    }
    low
}

/// Title shown next to the player's level
pub fn title_for(level: u32) -> &'static str {
    match level {
        0..=4 => "Refactoring Apprentice",
        5..=9 => "Refactorer",
        10..=19 => "Expert Refactorer",
        20..=29 => "Refactoring Master",
        30..=50 => "Grand Master",
        _ => "Living Legend",
    }
}

/// Coarse level bracket used for badges
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelTier {
    Apprentice,
    Refactorer,
    Expert,
    Master,
    GrandMaster,
    Legend,
}

impl LevelTier {
    pub fn for_level(level: u32) -> Self {
        match level {
            0..=4 => LevelTier::Apprentice,
            5..=9 => LevelTier::Refactorer,
            10..=19 => LevelTier::Expert,
            20..=29 => LevelTier::Master,
            30..=50 => LevelTier::GrandMaster,
            _ => LevelTier::Legend,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LevelTier::Apprentice => "Apprentice",
            LevelTier::Refactorer => "Refactorer",
            LevelTier::Expert => "Expert",
            LevelTier::Master => "Master",
            LevelTier::GrandMaster => "Grand Master",
            LevelTier::Legend => "Legend",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            LevelTier::Apprentice => "🌱",
            LevelTier::Refactorer => "⚔️",
            LevelTier::Expert => "🛡️",
            LevelTier::Master => "🎖️",
            LevelTier::GrandMaster => "👑",
            LevelTier::Legend => "🧙",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_values() {
        assert_eq!(xp_threshold(0), 0);
        assert_eq!(xp_threshold(1), 0);
        assert_eq!(xp_threshold(2), 282);
        assert_eq!(xp_threshold(3), 519);
        assert_eq!(xp_threshold(4), 800);
        assert_eq!(xp_threshold(10), 3162);
    }

    #[test]
    fn test_level_for_boundaries() {
        assert_eq!(level_for(0), 1);
        assert_eq!(level_for(281), 1);
        assert_eq!(level_for(282), 2);
        assert_eq!(level_for(799), 3);
        assert_eq!(level_for(800), 4);
    }

    #[test]
    fn test_level_for_extreme_totals() {
        let top = xp_threshold(MAX_LEVEL);
        assert!(top < u64::MAX);
        assert_eq!(level_for(u64::MAX), MAX_LEVEL);
        assert_eq!(level_for(top), MAX_LEVEL);
        assert_eq!(level_for(top - 1), MAX_LEVEL - 1);
        assert_eq!(level_for(xp_threshold(1_000_000)), 1_000_000);
        assert_eq!(level_for(xp_threshold(1_000_000) - 1), 999_999);
    }

    #[test]
    fn test_threshold_strictly_increasing_from_two() {
        for level in 2..500 {
            assert!(xp_threshold(level + 1) > xp_threshold(level));
        }
    }

    #[test]
    fn test_titles_and_tiers_agree_on_brackets() {
        assert_eq!(title_for(1), "Refactoring Apprentice");
        assert_eq!(LevelTier::for_level(1), LevelTier::Apprentice);
        assert_eq!(title_for(5), "Refactorer");
        assert_eq!(title_for(50), "Grand Master");
        assert_eq!(LevelTier::for_level(50), LevelTier::GrandMaster);
        assert_eq!(title_for(51), "Living Legend");
        assert_eq!(LevelTier::for_level(51).emoji(), "🧙");
    }
}

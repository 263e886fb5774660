//! Per-category rollups over the action history.

use crate::core::{ActionCategory, DetectedAction, RefactoringKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregated activity for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub category: ActionCategory,
    pub action_count: usize,
    pub total_xp: u64,
    /// Most frequent kind; ties go to the kind seen first in the history
    pub most_frequent_kind: Option<RefactoringKind>,
}

impl CategoryStats {
    pub fn empty(category: ActionCategory) -> Self {
        Self {
            category,
            action_count: 0,
            total_xp: 0,
            most_frequent_kind: None,
        }
    }

    pub fn average_xp(&self) -> f64 {
        if self.action_count == 0 {
            0.0
        } else {
            self.total_xp as f64 / self.action_count as f64
        }
    }
}

/// Roll the history up into one entry per category.
///
/// All four categories are always present, empty ones with zero counts.
pub fn aggregate(history: &[DetectedAction]) -> BTreeMap<ActionCategory, CategoryStats> {
    ActionCategory::ALL
        .into_iter()
        .map(|category| (category, category_stats(category, history)))
        .collect()
}

fn category_stats(category: ActionCategory, history: &[DetectedAction]) -> CategoryStats {
    // Counts kept in first-seen order so ties resolve deterministically.
    let mut counts: Vec<(RefactoringKind, usize)> = Vec::new();
    let mut stats = CategoryStats::empty(category);

    for action in history.iter().filter(|action| action.category() == category) {
        stats.action_count += 1;
        stats.total_xp += u64::from(action.xp_reward());
        match counts.iter_mut().find(|(kind, _)| *kind == action.kind) {
            Some((_, count)) => *count += 1,
            None => counts.push((action.kind, 1)),
        }
    }

    stats.most_frequent_kind = most_frequent(&counts);
    stats
}

fn most_frequent(counts: &[(RefactoringKind, usize)]) -> Option<RefactoringKind> {
    counts
        .iter()
        .fold(None, |best: Option<(RefactoringKind, usize)>, &(kind, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((kind, count)),
        })
        .map(|(kind, _)| kind)
}

/// Kinds ordered by how often they occur, ties by first appearance
pub fn top_kinds(history: &[DetectedAction], limit: usize) -> Vec<(RefactoringKind, usize)> {
    let mut counts: Vec<(RefactoringKind, usize)> = Vec::new();
    for action in history {
        match counts.iter_mut().find(|(kind, _)| *kind == action.kind) {
            Some((_, count)) => *count += 1,
            None => counts.push((action.kind, 1)),
        }
    }
    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);
    counts
}

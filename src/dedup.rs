//! Suppression of duplicate detections across sources.
//!
//! Independent sources (structured refactoring events, generic user actions,
//! finished commands) can all report the same logical operation. The gate
//! remembers the last accepted instant per `(kind, origin file)` and rejects
//! repeats inside a short window.
//!
//! Check-and-set for a key happens under that key's DashMap shard lock, so two
//! concurrent "first" detections cannot both be accepted.

use crate::core::{RefactoringKind, UNKNOWN_ORIGIN};
use chrono::{DateTime, Duration, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// Default deduplication window
pub const DEFAULT_DEDUP_WINDOW_MS: u64 = 500;

/// Cache key: kind plus origin file (or [`UNKNOWN_ORIGIN`])
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub kind: RefactoringKind,
    pub origin: String,
}

impl DedupKey {
    pub fn new(kind: RefactoringKind, origin_file: Option<&str>) -> Self {
        Self {
            kind,
            origin: origin_file.unwrap_or(UNKNOWN_ORIGIN).to_string(),
        }
    }
}

/// Short-lived cache of recently accepted detections
#[derive(Debug)]
pub struct DeduplicationGate {
    window: Duration,
    last_seen: DashMap<DedupKey, DateTime<Utc>>,
}

impl Default for DeduplicationGate {
    fn default() -> Self {
        Self::with_window_ms(DEFAULT_DEDUP_WINDOW_MS)
    }
}

impl DeduplicationGate {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_seen: DashMap::new(),
        }
    }

    pub fn with_window_ms(window_ms: u64) -> Self {
        let window = i64::try_from(window_ms)
            .ok()
            .and_then(Duration::try_milliseconds)
            .unwrap_or(Duration::MAX);
        Self::new(window)
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Decide whether a detection is new, recording it when it is.
    ///
    /// Rejects when the same key was accepted less than one window before
    /// `now`. A clock that stepped backwards counts as inside the window.
    pub fn should_accept(
        &self,
        kind: RefactoringKind,
        origin_file: Option<&str>,
        now: DateTime<Utc>,
    ) -> bool {
        self.evict_expired(now);

        match self.last_seen.entry(DedupKey::new(kind, origin_file)) {
            Entry::Occupied(mut entry) => {
                if now - *entry.get() < self.window {
                    false
                } else {
                    entry.insert(now);
                    true
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(now);
                true
            }
        }
    }

    /// Drop entries whose window has passed. Best effort; never affects the
    /// decision for the call that triggered it.
    fn evict_expired(&self, now: DateTime<Utc>) {
        let window = self.window;
        self.last_seen.retain(|_, seen| now - *seen < window);
    }

    pub fn len(&self) -> usize {
        self.last_seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_seen.is_empty()
    }

    pub fn clear(&self) {
        self.last_seen.clear();
    }
}

//! The detection coordinator.
//!
//! [`RefactoringSession`] is the single entry point for raw detections. It
//! only sequences the other modules:
//!
//! 1. classify the raw id ([`crate::classifier`]); unrecognized ids stop here
//! 2. ask the [`DeduplicationGate`]; duplicates stop here
//! 3. append the action and add its base XP
//! 4. feed the action to the [`QuestEngine`] and add any quest XP
//! 5. compare levels before and after
//! 6. publish events and one `StateChanged` snapshot to listeners
//!
//! Steps 3 to 5 run under one mutex, so history, XP and quests change
//! together. Step 6 runs after the lock is released, on an immutable snapshot.

pub mod events;

pub use events::{LevelUp, ListenerId, SessionEvent, SessionListener, SessionSnapshot};

use crate::classifier;
use crate::config::DetectionConfig;
use crate::core::{DetectedAction, RawDetection, UNKNOWN_ORIGIN};
use crate::dedup::DeduplicationGate;
use crate::errors::Result;
use crate::progression::{level_for, title_for, PlayerProgress};
use crate::quests::{Quest, QuestCompletion, QuestEngine};
use crate::snapshot::{ProgressSnapshot, QuestSnapshot};
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Result of handing one raw detection to the session
#[derive(Debug, Clone, PartialEq)]
pub enum HandleOutcome {
    /// The id maps to no known refactoring; nothing changed
    Unrecognized,
    /// Same kind and file seen inside the dedup window; nothing changed
    Duplicate(crate::core::RefactoringKind),
    Accepted(Box<AcceptedAction>),
}

impl HandleOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, HandleOutcome::Accepted(_))
    }
}

/// Everything an accepted detection changed
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedAction {
    pub action: DetectedAction,
    /// Base XP of the action plus XP from quests it completed
    pub xp_gained: u64,
    pub level_up: Option<LevelUp>,
    pub completed_quests: Vec<QuestCompletion>,
    pub progress: PlayerProgress,
}

#[derive(Debug)]
struct SessionState {
    revision: u64,
    total_xp: u64,
    history: Vec<DetectedAction>,
    quests: QuestEngine,
}

impl SessionState {
    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            revision: self.revision,
            progress: PlayerProgress::compute(self.total_xp, &self.history),
            active_quests: self.quests.active_quests().to_vec(),
            completed_quests: self.quests.completed_quests().to_vec(),
        }
    }

    fn record(&mut self, action: DetectedAction) -> (AcceptedAction, Vec<SessionEvent>) {
        let old_level = level_for(self.total_xp);
        let base_xp = action.xp_reward();

        self.history.push(action.clone());
        self.total_xp = self.total_xp.saturating_add(u64::from(base_xp));

        let update = self.quests.on_action(&action);
        let quest_xp = update.xp_awarded();
        self.total_xp = self.total_xp.saturating_add(quest_xp);
        self.revision += 1;

        let new_level = level_for(self.total_xp);
        let level_up = (new_level > old_level).then(|| LevelUp {
            from: old_level,
            to: new_level,
            title: title_for(new_level),
        });
        if let Some(level_up) = level_up {
            info!(
                "Level up! {} -> {} - {}",
                level_up.from, level_up.to, level_up.title
            );
        }

        let snapshot = self.snapshot();
        let mut events = vec![SessionEvent::ActionRecorded {
            action: action.clone(),
            xp_gained: base_xp,
        }];
        events.extend(
            update
                .completed
                .iter()
                .cloned()
                .map(SessionEvent::QuestCompleted),
        );
        events.extend(level_up.map(SessionEvent::LevelUp));

        let accepted = AcceptedAction {
            action,
            xp_gained: u64::from(base_xp).saturating_add(quest_xp),
            level_up,
            completed_quests: update.completed,
            progress: snapshot.progress.clone(),
        };
        events.push(SessionEvent::StateChanged(Box::new(snapshot)));

        (accepted, events)
    }
}

/// One player's session: XP, history, quests and dedup cache.
///
/// Shareable across threads (`Arc<RefactoringSession>`); every host source
/// calls [`RefactoringSession::handle`].
pub struct RefactoringSession {
    gate: DeduplicationGate,
    state: Mutex<SessionState>,
    listeners: RwLock<Vec<(ListenerId, Arc<dyn SessionListener>)>>,
    next_listener_id: AtomicU64,
}

impl std::fmt::Debug for RefactoringSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefactoringSession")
            .field("gate", &self.gate)
            .field("state", &*self.state.lock())
            .field("listeners", &self.listeners.read().len())
            .finish()
    }
}

impl RefactoringSession {
    /// Fresh profile with the starter quests
    pub fn new(config: &DetectionConfig, now: DateTime<Utc>) -> Result<Self> {
        Ok(Self::from_parts(
            config,
            0,
            Vec::new(),
            QuestEngine::with_starter_quests(now)?,
        ))
    }

    /// Restore a profile from persisted snapshots, skipping malformed records
    pub fn from_snapshots(
        config: &DetectionConfig,
        progress: &ProgressSnapshot,
        quests: &QuestSnapshot,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let (total_xp, history) = progress.restore();
        let quests = quests.restore(now)?;
        info!(
            "Session restored: {} XP, {} actions, {} active quests, {} completed",
            total_xp,
            history.len(),
            quests.active_quests().len(),
            quests.completed_quests().len()
        );
        Ok(Self::from_parts(config, total_xp, history, quests))
    }

    fn from_parts(
        config: &DetectionConfig,
        total_xp: u64,
        history: Vec<DetectedAction>,
        quests: QuestEngine,
    ) -> Self {
        Self {
            gate: DeduplicationGate::with_window_ms(config.dedup_window_ms),
            state: Mutex::new(SessionState {
                revision: 0,
                total_xp,
                history,
                quests,
            }),
            listeners: RwLock::new(Vec::new()),
            next_listener_id: AtomicU64::new(0),
        }
    }

    /// Classify, deduplicate and record one raw detection
    pub fn handle(&self, detection: &RawDetection, now: DateTime<Utc>) -> HandleOutcome {
        let Some(kind) = classifier::classify(&detection.raw_id) else {
            if classifier::looks_like_refactoring(&detection.raw_id) {
                warn!(
                    "Unknown refactoring id: {} (source: {:?})",
                    detection.raw_id, detection.source
                );
            } else {
                debug!("Ignoring non-refactoring id: {}", detection.raw_id);
            }
            return HandleOutcome::Unrecognized;
        };

        let origin = detection.origin_file.as_deref();
        if !self.gate.should_accept(kind, origin, now) {
            debug!(
                "Duplicate {} in {} from {:?} suppressed",
                kind,
                origin.unwrap_or(UNKNOWN_ORIGIN),
                detection.source
            );
            return HandleOutcome::Duplicate(kind);
        }

        let action = DetectedAction::new(kind, now)
            .with_origin_file(origin)
            .with_element_hint(detection.element_hint.as_deref());
        info!(
            "Refactoring detected: {} in {} (+{} XP)",
            kind,
            origin.unwrap_or(UNKNOWN_ORIGIN),
            kind.base_xp()
        );

        let (accepted, events) = self.state.lock().record(action);
        self.publish(&events);
        HandleOutcome::Accepted(Box::new(accepted))
    }

    /// Undo notifications are logged only; XP and quest progress stay as
    /// they are.
    pub fn on_undo(&self, raw_id: &str) {
        match classifier::classify(raw_id) {
            Some(kind) => info!("Refactoring undone: {} ({}), XP kept", raw_id, kind),
            None => debug!("Undo of unrecognized id: {}", raw_id),
        }
    }

    /// Register an additional quest; it must be fresh and have a new id
    pub fn add_quest(&self, quest: Quest) -> Result<()> {
        let snapshot = {
            let mut state = self.state.lock();
            state.quests.add_quest(quest)?;
            state.revision += 1;
            state.snapshot()
        };
        self.publish(&[SessionEvent::StateChanged(Box::new(snapshot))]);
        Ok(())
    }

    /// Clear XP, history and the dedup cache. Quests are left alone.
    pub fn reset_progress(&self) {
        let snapshot = {
            let mut state = self.state.lock();
            state.total_xp = 0;
            state.history.clear();
            state.revision += 1;
            state.snapshot()
        };
        self.gate.clear();
        info!("Player progress reset");
        self.publish(&[SessionEvent::StateChanged(Box::new(snapshot))]);
    }

    /// Replace every quest with a fresh starter set
    pub fn reset_quests(&self, now: DateTime<Utc>) -> Result<()> {
        let snapshot = {
            let mut state = self.state.lock();
            state.quests.reset(now)?;
            state.revision += 1;
            state.snapshot()
        };
        info!("Quests reset to the starter set");
        self.publish(&[SessionEvent::StateChanged(Box::new(snapshot))]);
        Ok(())
    }

    pub fn subscribe(&self, listener: Arc<dyn SessionListener>) -> ListenerId {
        let id = ListenerId(self.next_listener_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().push((id, listener));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    fn publish(&self, events: &[SessionEvent]) {
        let listeners: Vec<Arc<dyn SessionListener>> = self
            .listeners
            .read()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for event in events {
            for listener in &listeners {
                match panic::catch_unwind(AssertUnwindSafe(|| listener.on_event(event))) {
                    Ok(Ok(())) => {}
                    Ok(Err(err)) => {
                        error!("Session listener failed on {}: {:#}", event.name(), err)
                    }
                    Err(_) => error!("Session listener panicked on {}", event.name()),
                }
            }
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.lock().snapshot()
    }

    /// Snapshot plus the full history, read under one lock so they agree
    pub fn snapshot_with_history(&self) -> (SessionSnapshot, Vec<DetectedAction>) {
        let state = self.state.lock();
        (state.snapshot(), state.history.clone())
    }

    pub fn progress(&self) -> PlayerProgress {
        let state = self.state.lock();
        PlayerProgress::compute(state.total_xp, &state.history)
    }

    pub fn total_xp(&self) -> u64 {
        self.state.lock().total_xp
    }

    pub fn history(&self) -> Vec<DetectedAction> {
        self.state.lock().history.clone()
    }

    /// The last `count` actions, oldest first
    pub fn recent_actions(&self, count: usize) -> Vec<DetectedAction> {
        let state = self.state.lock();
        let start = state.history.len().saturating_sub(count);
        state.history[start..].to_vec()
    }

    pub fn active_quests(&self) -> Vec<Quest> {
        self.state.lock().quests.active_quests().to_vec()
    }

    pub fn completed_quests(&self) -> Vec<Quest> {
        self.state.lock().quests.completed_quests().to_vec()
    }

    /// Persistable XP and history
    pub fn progress_snapshot(&self) -> ProgressSnapshot {
        let state = self.state.lock();
        ProgressSnapshot::capture(state.total_xp, &state.history)
    }

    /// Persistable quest collections
    pub fn quest_snapshot(&self) -> QuestSnapshot {
        QuestSnapshot::capture(&self.state.lock().quests)
    }
}

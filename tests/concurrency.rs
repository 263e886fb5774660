//! Several host sources reporting into one session from different threads.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use refquest::config::DetectionConfig;
use refquest::{RawDetection, RefactoringSession, SessionEvent};
use std::sync::Arc;
use std::thread;

fn t0() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(1_700_000_000_000).unwrap()
}

#[test]
fn racing_sources_record_one_action() {
    let session = Arc::new(RefactoringSession::new(&DetectionConfig::default(), t0()).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let session = Arc::clone(&session);
            thread::spawn(move || {
                session
                    .handle(&RawDetection::new("ExtractMethod").in_file("Main.kt"), t0())
                    .is_accepted()
            })
        })
        .collect();
    let accepted = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|accepted| *accepted)
        .count();

    assert_eq!(accepted, 1);
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.total_xp(), 10);
}

#[test]
fn concurrent_distinct_actions_are_all_counted() {
    let session = Arc::new(RefactoringSession::new(&DetectionConfig::default(), t0()).unwrap());
    let revisions = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&revisions);
    session.subscribe(Arc::new(move |event: &SessionEvent| {
        if let SessionEvent::StateChanged(snapshot) = event {
            sink.lock().push(snapshot.revision);
        }
        Ok(())
    }));

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let session = Arc::clone(&session);
            thread::spawn(move || {
                for i in 0..25 {
                    let raw = RawDetection::new("Rename").in_file(format!("w{worker}-f{i}.kt"));
                    session.handle(&raw, t0() + Duration::milliseconds(i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(session.history().len(), 100);
    let snapshot = session.snapshot();
    assert_eq!(snapshot.progress.action_count, 100);
    assert_eq!(snapshot.revision, 100);

    // Each accepted action publishes exactly one snapshot, each with its own revision.
    let mut seen = revisions.lock().clone();
    seen.sort_unstable();
    assert_eq!(seen, (1..=100).collect::<Vec<u64>>());
}

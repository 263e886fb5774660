//! Player-facing notifications on stderr.

use crate::config::NotificationConfig;
use crate::session::{SessionEvent, SessionListener};
use colored::*;
use parking_lot::Mutex;
use std::io::Write;

/// Session listener that prints XP gains, level-ups and quest completions.
///
/// Each kind of message can be switched off through [`NotificationConfig`];
/// `StateChanged` events are never printed.
pub struct ConsoleNotifier<W: Write + Send> {
    settings: NotificationConfig,
    out: Mutex<W>,
}

impl ConsoleNotifier<std::io::Stderr> {
    pub fn stderr(settings: NotificationConfig) -> Self {
        Self::new(settings, std::io::stderr())
    }
}

impl<W: Write + Send> ConsoleNotifier<W> {
    pub fn new(settings: NotificationConfig, out: W) -> Self {
        Self {
            settings,
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn message(&self, event: &SessionEvent) -> Option<String> {
        match event {
            SessionEvent::ActionRecorded { action, xp_gained } if self.settings.show_xp_gain => {
                Some(format!(
                    "{} {} {}",
                    format!("+{xp_gained} XP").green().bold(),
                    action.kind.gameplay_tag(),
                    action.kind.display_name()
                ))
            }
            SessionEvent::LevelUp(level_up) if self.settings.show_level_up => Some(format!(
                "{} Level {} -> {}: {}",
                "LEVEL UP!".yellow().bold(),
                level_up.from,
                level_up.to,
                level_up.title
            )),
            SessionEvent::QuestCompleted(done) if self.settings.show_quest_completed => {
                Some(format!(
                    "{} {} {} (+{} XP)",
                    "Quest completed:".magenta().bold(),
                    done.quest.category.icon(),
                    done.quest.title,
                    done.xp_awarded
                ))
            }
            _ => None,
        }
    }
}

impl<W: Write + Send> SessionListener for ConsoleNotifier<W> {
    fn on_event(&self, event: &SessionEvent) -> anyhow::Result<()> {
        if let Some(message) = self.message(event) {
            writeln!(self.out.lock(), "{message}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RawDetection;
    use crate::session::RefactoringSession;
    use chrono::DateTime;
    use std::sync::Arc;

    fn run(settings: NotificationConfig) -> String {
        colored::control::set_override(false);
        let now = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        let session = RefactoringSession::new(&Default::default(), now).unwrap();
        let notifier = Arc::new(ConsoleNotifier::new(settings, Vec::new()));
        session.subscribe(notifier.clone());

        for i in 0..5 {
            let raw = RawDetection::new("Rename").in_file(format!("F{i}.kt"));
            session.handle(&raw, now + chrono::Duration::seconds(i));
        }
        drop(session);
        let notifier = Arc::try_unwrap(notifier).ok().unwrap();
        String::from_utf8(notifier.into_inner()).unwrap()
    }

    #[test]
    fn test_all_notifications_enabled() {
        let text = run(NotificationConfig::default());
        assert_eq!(text.matches("+5 XP").count(), 5);
        assert!(text.contains("Quest completed: ♻️ First Steps (+100 XP)"));
    }

    #[test]
    fn test_disabled_notifications_are_silent() {
        let text = run(NotificationConfig {
            show_xp_gain: false,
            show_quest_completed: false,
            ..Default::default()
        });
        assert!(text.is_empty());
    }
}

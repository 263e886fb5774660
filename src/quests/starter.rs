//! The starter quest set seeded into empty profiles.
//!
//! | id | objectives | base XP | difficulty |
//! |---|---|---|---|
//! | `first-steps` | any refactoring × 5 | 100 | Easy |
//! | `rename-master` | Rename × 10 | 150 | Easy |
//! | `extract-expert` | Extract Method × 5 | 200 | Medium |
//! | `spring-cleaning` | Optimize Imports × 10, Reformat Code × 10 | 250 | Medium |
//! | `budding-architect` | Extract Class × 3, Move Method × 5 | 500 | Hard |
//! | `logic-tamer` | Decompose Conditional × 3 | 250 | Medium |
//! | `guardian` | Encapsulate Field × 3 | 200 | Easy |
//! | `decoupler` | Introduce Interface × 3 | 300 | Medium |
//!
//! Stable ids keep re-seeding idempotent and snapshots readable.

use super::matching::ObjectiveTarget;
use super::model::{Quest, QuestCategory, QuestDifficulty, QuestObjective};
use crate::core::RefactoringKind;
use crate::errors::Result;
use chrono::{DateTime, Utc};

fn kind(description: &str, kind: RefactoringKind, count: u32) -> QuestObjective {
    QuestObjective::new(description, ObjectiveTarget::Kind(kind), count)
}

/// Build the starter quests, all fresh and stamped with `now`
pub fn starter_quests(now: DateTime<Utc>) -> Result<Vec<Quest>> {
    let quests = [
        Quest::builder("First Steps")
            .id("first-steps")
            .description("Perform 5 refactoring actions to start your adventure")
            .category(QuestCategory::Refactoring)
            .reward(100, QuestDifficulty::Easy)
            .objective(QuestObjective::new(
                "Perform 5 refactorings",
                ObjectiveTarget::AnyRefactoring,
                5,
            )),
        Quest::builder("Rename Master")
            .id("rename-master")
            .description("Use the Rename action 10 times to clarify your code")
            .category(QuestCategory::Refactoring)
            .reward(150, QuestDifficulty::Easy)
            .objective(kind("Rename 10 elements", RefactoringKind::Rename, 10)),
        Quest::builder("Extract Expert")
            .id("extract-expert")
            .description("Extract 5 methods to improve readability")
            .category(QuestCategory::Refactoring)
            .reward(200, QuestDifficulty::Medium)
            .objective(kind("Extract Method × 5", RefactoringKind::ExtractMethod, 5)),
        Quest::builder("Spring Cleaning")
            .id("spring-cleaning")
            .description("Clean your code with 20 cleanup actions")
            .category(QuestCategory::Cleanup)
            .reward(250, QuestDifficulty::Medium)
            .objective(kind("Optimize Imports", RefactoringKind::OptimizeImports, 10))
            .objective(kind("Reformat Code", RefactoringKind::ReformatCode, 10)),
        Quest::builder("Budding Architect")
            .id("budding-architect")
            .description("Improve your code structure with advanced refactorings")
            .category(QuestCategory::Design)
            .reward(500, QuestDifficulty::Hard)
            .objective(kind("Extract Class × 3", RefactoringKind::ExtractClass, 3))
            .objective(kind("Move Method × 5", RefactoringKind::MoveMethod, 5)),
        Quest::builder("Logic Tamer")
            .id("logic-tamer")
            .description("Untangle complex conditionals")
            .category(QuestCategory::Refactoring)
            .reward(250, QuestDifficulty::Medium)
            .objective(kind(
                "Decompose Conditional × 3",
                RefactoringKind::DecomposeConditional,
                3,
            )),
        Quest::builder("Guardian")
            .id("guardian")
            .description("Protect your state behind accessors")
            .category(QuestCategory::Refactoring)
            .reward(200, QuestDifficulty::Easy)
            .objective(kind("Encapsulate Field × 3", RefactoringKind::EncapsulateField, 3)),
        Quest::builder("Decoupler")
            .id("decoupler")
            .description("Depend on abstractions instead of concretions")
            .category(QuestCategory::Design)
            .reward(300, QuestDifficulty::Medium)
            .objective(kind(
                "Introduce Interface × 3",
                RefactoringKind::IntroduceInterface,
                3,
            )),
    ];

    quests.into_iter().map(|builder| builder.build(now)).collect()
}

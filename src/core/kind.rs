//! The closed refactoring taxonomy.
//!
//! Every kind carries its static metadata (display name, category, base XP,
//! gameplay tag) as data in [`KIND_TABLE`]. Mapping raw identifiers onto this
//! set lives in [`crate::classifier`], not here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four refactoring families used for statistics grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionCategory {
    Structure,
    Logic,
    Data,
    Coupling,
}

impl ActionCategory {
    /// All categories in reporting order
    pub const ALL: [ActionCategory; 4] = [
        ActionCategory::Structure,
        ActionCategory::Logic,
        ActionCategory::Data,
        ActionCategory::Coupling,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            ActionCategory::Structure => "Code Structure",
            ActionCategory::Logic => "Logic & Complexity",
            ActionCategory::Data => "Data & State",
            ActionCategory::Coupling => "Coupling",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ActionCategory::Structure => "🧱",
            ActionCategory::Logic => "🧠",
            ActionCategory::Data => "📦",
            ActionCategory::Coupling => "🔗",
        }
    }
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A recognized refactoring operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefactoringKind {
    // Structure
    ExtractMethod,
    InlineMethod,
    InlineVariable,
    ExtractClass,
    MoveMethod,
    Rename,
    ChangeSignature,
    IntroduceParameterObject,
    RemoveParameter,
    ExtractVariable,
    ExtractConstant,
    ExtractField,
    PullUp,
    PushDown,
    // Logic
    ReplaceConditionalWithPolymorphism,
    DecomposeConditional,
    ConsolidateConditionals,
    RemoveDeadCode,
    SimplifyBoolean,
    // Data
    EncapsulateField,
    ReplaceDataClassWithObject,
    RemoveSettingMethod,
    IntroduceValueObject,
    // Coupling
    IntroduceInterface,
    DependencyInversion,
    ReplaceInheritanceWithDelegation,
    BreakCyclicDependency,
    // Cleanup
    OptimizeImports,
    ReformatCode,
    RemoveUnused,
    ConvertToStream,
    SimplifyExpression,
    SafeDelete,
    MoveClass,
}

/// Static metadata attached to a [`RefactoringKind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindInfo {
    pub kind: RefactoringKind,
    /// Stable persisted identifier
    pub id: &'static str,
    pub display_name: &'static str,
    pub category: ActionCategory,
    pub base_xp: u32,
    pub gameplay_tag: &'static str,
}

const fn info(
    kind: RefactoringKind,
    id: &'static str,
    display_name: &'static str,
    category: ActionCategory,
    base_xp: u32,
    gameplay_tag: &'static str,
) -> KindInfo {
    KindInfo {
        kind,
        id,
        display_name,
        category,
        base_xp,
        gameplay_tag,
    }
}

use ActionCategory::{Coupling, Data, Logic, Structure};
use RefactoringKind as K;

/// Metadata for every kind, in declaration order
pub static KIND_TABLE: &[KindInfo] = &[
    info(K::ExtractMethod, "EXTRACT_METHOD", "Extract Method", Structure, 10, "🧪 Clarity"),
    info(K::InlineMethod, "INLINE_METHOD", "Inline Method", Structure, 8, "🗡️ Anti-boilerplate"),
    info(K::InlineVariable, "INLINE_VARIABLE", "Inline Variable", Structure, 5, "🗡️ Anti-boilerplate"),
    info(K::ExtractClass, "EXTRACT_CLASS", "Extract Class", Structure, 15, "🏗️ Architecture"),
    info(K::MoveMethod, "MOVE_METHOD", "Move Method", Structure, 12, "🔀 Balance"),
    info(K::Rename, "RENAME", "Rename", Structure, 5, "✨ Clarity"),
    info(K::ChangeSignature, "CHANGE_SIGNATURE", "Change Signature", Structure, 10, "🔧 Design"),
    info(
        K::IntroduceParameterObject,
        "INTRODUCE_PARAMETER_OBJECT",
        "Introduce Parameter Object",
        Structure,
        15,
        "🧳 Packing",
    ),
    info(K::RemoveParameter, "REMOVE_PARAMETER", "Remove Parameter", Structure, 8, "✂️ Simplicity"),
    info(K::ExtractVariable, "EXTRACT_VARIABLE", "Extract Variable", Structure, 5, "🧪 Clarity"),
    info(K::ExtractConstant, "EXTRACT_CONSTANT", "Extract Constant", Structure, 5, "🧪 Clarity"),
    info(K::ExtractField, "EXTRACT_FIELD", "Extract Field", Structure, 8, "🧪 Clarity"),
    info(K::PullUp, "PULL_UP", "Pull Up", Structure, 12, "🏗️ Architecture"),
    info(K::PushDown, "PUSH_DOWN", "Push Down", Structure, 12, "🏗️ Architecture"),
    info(
        K::ReplaceConditionalWithPolymorphism,
        "REPLACE_CONDITIONAL_WITH_POLYMORPHISM",
        "Replace Conditional with Polymorphism",
        Logic,
        20,
        "🐍 Hydra Slayer",
    ),
    info(K::DecomposeConditional, "DECOMPOSE_CONDITIONAL", "Decompose Conditional", Logic, 12, "🧩 Clarity"),
    info(
        K::ConsolidateConditionals,
        "CONSOLIDATE_CONDITIONALS",
        "Consolidate Conditionals",
        Logic,
        10,
        "👯 Deduplicator",
    ),
    info(K::RemoveDeadCode, "REMOVE_DEAD_CODE", "Remove Dead Code", Logic, 8, "🧟 Zombie Hunter"),
    info(K::SimplifyBoolean, "SIMPLIFY_BOOLEAN", "Simplify Boolean", Logic, 8, "🧠 Logic Master"),
    info(K::EncapsulateField, "ENCAPSULATE_FIELD", "Encapsulate Field", Data, 10, "🔒 Protector"),
    info(
        K::ReplaceDataClassWithObject,
        "REPLACE_DATA_CLASS_WITH_OBJECT",
        "Replace Data Class with Object",
        Data,
        15,
        "📦 Enricher",
    ),
    info(K::RemoveSettingMethod, "REMOVE_SETTING_METHOD", "Remove Setting Method", Data, 10, "🔐 Immutability"),
    info(K::IntroduceValueObject, "INTRODUCE_VALUE_OBJECT", "Introduce Value Object", Data, 15, "💎 Value Creator"),
    info(K::IntroduceInterface, "INTRODUCE_INTERFACE", "Introduce Interface", Coupling, 15, "🔗 Decoupler"),
    info(K::DependencyInversion, "DEPENDENCY_INVERSION", "Dependency Inversion", Coupling, 20, "🔗 Inverter"),
    info(
        K::ReplaceInheritanceWithDelegation,
        "REPLACE_INHERITANCE_WITH_DELEGATION",
        "Replace Inheritance with Delegation",
        Coupling,
        18,
        "🔗 Delegator",
    ),
    info(
        K::BreakCyclicDependency,
        "BREAK_CYCLIC_DEPENDENCY",
        "Break Cyclic Dependency",
        Coupling,
        25,
        "🌀 Cycle Breaker",
    ),
    info(K::OptimizeImports, "OPTIMIZE_IMPORTS", "Optimize Imports", Structure, 2, "🧹 Cleaner"),
    info(K::ReformatCode, "REFORMAT_CODE", "Reformat Code", Structure, 3, "🎨 Formatter"),
    info(K::RemoveUnused, "REMOVE_UNUSED", "Remove Unused", Structure, 5, "🗑️ Janitor"),
    info(K::ConvertToStream, "CONVERT_TO_STREAM", "Convert to Stream", Logic, 10, "🌊 Modernizer"),
    info(K::SimplifyExpression, "SIMPLIFY_EXPRESSION", "Simplify Expression", Logic, 8, "🧠 Simplifier"),
    info(K::SafeDelete, "SAFE_DELETE", "Safe Delete", Structure, 5, "🗑️ Safe Remover"),
    info(K::MoveClass, "MOVE_CLASS", "Move Class", Structure, 12, "🔀 Organizer"),
];

impl RefactoringKind {
    /// Static metadata for this kind
    pub fn info(self) -> &'static KindInfo {
        // KIND_TABLE is in declaration order, so the discriminant is the index.
        &KIND_TABLE[self as usize]
    }

    pub fn id(self) -> &'static str {
        self.info().id
    }

    pub fn display_name(self) -> &'static str {
        self.info().display_name
    }

    pub fn category(self) -> ActionCategory {
        self.info().category
    }

    pub fn base_xp(self) -> u32 {
        self.info().base_xp
    }

    pub fn gameplay_tag(self) -> &'static str {
        self.info().gameplay_tag
    }

    /// Resolve a persisted identifier (`EXTRACT_METHOD`) back to its kind
    pub fn from_id(id: &str) -> Option<Self> {
        KIND_TABLE
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.kind)
    }

    /// Iterate over every kind in declaration order
    pub fn all() -> impl Iterator<Item = RefactoringKind> {
        KIND_TABLE.iter().map(|entry| entry.kind)
    }
}

impl fmt::Display for RefactoringKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_table_matches_declaration_order() {
        for (index, entry) in KIND_TABLE.iter().enumerate() {
            assert_eq!(entry.kind as usize, index, "{} is out of order", entry.id);
        }
        assert_eq!(KIND_TABLE.len(), 34);
    }

    #[test]
    fn test_every_kind_has_positive_xp() {
        assert!(RefactoringKind::all().all(|kind| kind.base_xp() > 0));
    }

    #[test]
    fn test_from_id_round_trips_every_kind() {
        for kind in RefactoringKind::all() {
            assert_eq!(RefactoringKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(RefactoringKind::from_id("TELEPORT_METHOD"), None);
    }

    #[test]
    fn test_serde_id_matches_table_id() {
        let json = serde_json::to_string(&RefactoringKind::ReplaceConditionalWithPolymorphism).unwrap();
        assert_eq!(json, "\"REPLACE_CONDITIONAL_WITH_POLYMORPHISM\"");
    }

    #[test]
    fn test_every_category_has_kinds() {
        for category in ActionCategory::ALL {
            assert!(
                RefactoringKind::all().any(|kind| kind.category() == category),
                "{category} has no kinds"
            );
        }
    }

    #[test]
    fn test_extract_method_metadata() {
        let kind = RefactoringKind::ExtractMethod;
        assert_eq!(kind.display_name(), "Extract Method");
        assert_eq!(kind.category(), ActionCategory::Structure);
        assert_eq!(kind.base_xp(), 10);
    }
}

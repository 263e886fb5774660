//! Ordered keyword rules for the second classification tier.
//!
//! Rules run against the output of [`super::normalize`]. Order is part of the
//! contract and is pinned by tests: the first rule that matches decides.

use crate::core::RefactoringKind;
use RefactoringKind as K;

/// A named keyword predicate mapping to one kind
pub struct Rule {
    pub name: &'static str,
    pub kind: RefactoringKind,
    pub matches: fn(&str) -> bool,
}

fn has(s: &str, needle: &str) -> bool {
    s.contains(needle)
}

fn has_any(s: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| s.contains(needle))
}

/// `move` as a verb, not the tail of `remove`
fn has_move(s: &str) -> bool {
    s.match_indices("move")
        .any(|(index, _)| !s[..index].ends_with("re"))
}

const METHOD: &[&str] = &["method", "function"];
const FIELD: &[&str] = &["field", "property"];

/// Keyword rules in priority order
pub static RULES: &[Rule] = &[
    // Extraction. Class extraction first so `extract class ... method` ids
    // never land on method extraction.
    Rule {
        name: "extract-class",
        kind: K::ExtractClass,
        matches: |s| has(s, "extract") && has(s, "class"),
    },
    Rule {
        name: "extract-method",
        kind: K::ExtractMethod,
        matches: |s| has(s, "extract") && has_any(s, METHOD),
    },
    Rule {
        name: "extract-variable",
        kind: K::ExtractVariable,
        matches: |s| has_any(s, &["extract", "introduce"]) && has(s, "variable"),
    },
    Rule {
        name: "extract-constant",
        kind: K::ExtractConstant,
        matches: |s| has_any(s, &["extract", "introduce"]) && has(s, "constant"),
    },
    Rule {
        name: "extract-field",
        kind: K::ExtractField,
        matches: |s| has_any(s, &["extract", "introduce"]) && has_any(s, FIELD),
    },
    Rule {
        name: "introduce-interface",
        kind: K::IntroduceInterface,
        matches: |s| has_any(s, &["extract", "introduce"]) && has(s, "interface"),
    },
    // Inlining
    Rule {
        name: "inline-variable",
        kind: K::InlineVariable,
        matches: |s| has(s, "inline") && has(s, "variable"),
    },
    Rule {
        name: "inline-method",
        kind: K::InlineMethod,
        matches: |s| has(s, "inline") && has_any(s, METHOD),
    },
    // Removals, ahead of moves
    Rule {
        name: "remove-setting-method",
        kind: K::RemoveSettingMethod,
        matches: |s| has(s, "remove") && has(s, "setting") && has_any(s, &["method", "property"]),
    },
    Rule {
        name: "remove-parameter",
        kind: K::RemoveParameter,
        matches: |s| has(s, "remove") && has(s, "parameter"),
    },
    Rule {
        name: "remove-dead-code",
        kind: K::RemoveDeadCode,
        matches: |s| (has(s, "remove") && has(s, "dead")) || has_any(s, &["deadcode", "dead_code"]),
    },
    Rule {
        name: "remove-unused",
        kind: K::RemoveUnused,
        matches: |s| has(s, "remove") && has(s, "unused"),
    },
    // Moves
    Rule {
        name: "move-method",
        kind: K::MoveMethod,
        matches: |s| has_move(s) && has_any(s, METHOD),
    },
    Rule {
        name: "move-class",
        kind: K::MoveClass,
        matches: |s| has_move(s) && has(s, "class"),
    },
    // Naming and signatures
    Rule {
        name: "rename",
        kind: K::Rename,
        matches: |s| has(s, "rename"),
    },
    Rule {
        name: "change-signature",
        kind: K::ChangeSignature,
        matches: |s| has_any(s, &["changesignature", "change_signature"]),
    },
    Rule {
        name: "introduce-parameter-object",
        kind: K::IntroduceParameterObject,
        matches: |s| has(s, "introduce") && has(s, "parameter") && has(s, "object"),
    },
    // Hierarchy
    Rule {
        name: "pull-up",
        kind: K::PullUp,
        matches: |s| has_any(s, &["pullup", "pull_up"]),
    },
    Rule {
        name: "push-down",
        kind: K::PushDown,
        matches: |s| has_any(s, &["pushdown", "push_down"]),
    },
    // Conditionals and expressions
    Rule {
        name: "replace-conditional-with-polymorphism",
        kind: K::ReplaceConditionalWithPolymorphism,
        matches: |s| has(s, "replace") && has(s, "conditional") && has(s, "polymorphism"),
    },
    Rule {
        name: "decompose-conditional",
        kind: K::DecomposeConditional,
        matches: |s| has(s, "decompose") && has(s, "conditional"),
    },
    Rule {
        name: "consolidate-conditionals",
        kind: K::ConsolidateConditionals,
        matches: |s| has(s, "consolidate") && has(s, "conditional"),
    },
    Rule {
        name: "simplify-boolean",
        kind: K::SimplifyBoolean,
        matches: |s| has(s, "simplify") && has(s, "boolean"),
    },
    Rule {
        name: "simplify-expression",
        kind: K::SimplifyExpression,
        matches: |s| has(s, "simplify") && has(s, "expression"),
    },
    Rule {
        name: "safe-delete",
        kind: K::SafeDelete,
        matches: |s| has_any(s, &["safedelete", "safe_delete"]),
    },
    // Data and state
    Rule {
        name: "encapsulate-field",
        kind: K::EncapsulateField,
        matches: |s| has(s, "encapsulate") && has_any(s, FIELD),
    },
    Rule {
        name: "replace-data-class-with-object",
        kind: K::ReplaceDataClassWithObject,
        matches: |s| has(s, "replace") && has(s, "data") && has(s, "class"),
    },
    Rule {
        name: "introduce-value-object",
        kind: K::IntroduceValueObject,
        matches: |s| has(s, "introduce") && has(s, "value") && has(s, "object"),
    },
    // Coupling
    Rule {
        name: "dependency-inversion",
        kind: K::DependencyInversion,
        matches: |s| has(s, "dependency") && has(s, "inversion"),
    },
    Rule {
        name: "replace-inheritance-with-delegation",
        kind: K::ReplaceInheritanceWithDelegation,
        matches: |s| has(s, "replace") && has(s, "inheritance") && has(s, "delegation"),
    },
    Rule {
        name: "break-cyclic-dependency",
        kind: K::BreakCyclicDependency,
        matches: |s| has(s, "break") && has_any(s, &["cyclic", "cycle"]),
    },
    // Modernization and housekeeping
    Rule {
        name: "convert-to-stream",
        kind: K::ConvertToStream,
        matches: |s| has(s, "convert") && has(s, "stream"),
    },
    Rule {
        name: "optimize-imports",
        kind: K::OptimizeImports,
        matches: |s| has(s, "optimize") && has(s, "import"),
    },
    Rule {
        name: "reformat-code",
        kind: K::ReformatCode,
        matches: |s| has(s, "reformat") && has(s, "code"),
    },
];

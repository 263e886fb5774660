//! Raw event identifier classification.
//!
//! Detection sources report loosely structured identifiers: exact host tool
//! ids (`refactoring.javascript.es6.moveModule`), camelCase action names
//! (`ExtractMethod`), dotted command names (`refactoring.inline.method`) and
//! plain command titles (`Extract Method`). [`classify`] maps all of them onto
//! the closed [`RefactoringKind`] set in two tiers:
//!
//! 1. **Exact table** ([`EXACT_IDS`]): the lowercased identifier is looked up
//!    verbatim. This tier settles identifiers whose vocabulary would mislead
//!    the keyword rules, e.g. `moveModule` is a method-level move.
//! 2. **Keyword rules** ([`RULES`]): the identifier is normalized and tested
//!    against an ordered list of keyword predicates. The first matching rule
//!    wins; more specific combinations are listed before generic ones.
//!
//! The function is pure: no state, no I/O, same answer for the same input.

mod rules;

pub use rules::{Rule, RULES};

use crate::core::RefactoringKind;

/// Which tier produced a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    Exact,
    Keyword,
}

/// A successful classification with its provenance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub kind: RefactoringKind,
    pub tier: MatchTier,
    /// Name of the keyword rule, or the matched literal for the exact tier
    pub matched_by: &'static str,
}

/// Literal identifiers (lowercase) with a fixed meaning.
pub static EXACT_IDS: &[(&str, RefactoringKind)] = &[
    ("extractmethod", RefactoringKind::ExtractMethod),
    ("extractfunction", RefactoringKind::ExtractMethod),
    ("introducefunction", RefactoringKind::ExtractMethod),
    ("introducemethod", RefactoringKind::ExtractMethod),
    ("refactoring.extractmethod", RefactoringKind::ExtractMethod),
    ("introducevariable", RefactoringKind::ExtractVariable),
    ("introduceconstant", RefactoringKind::ExtractConstant),
    ("introduceproperty", RefactoringKind::ExtractField),
    ("introducefield", RefactoringKind::ExtractField),
    ("inlinevariable", RefactoringKind::InlineVariable),
    ("inline", RefactoringKind::InlineMethod),
    ("inlinemethod", RefactoringKind::InlineMethod),
    ("inlinefunction", RefactoringKind::InlineMethod),
    ("move", RefactoringKind::MoveMethod),
    ("refactoring.javascript.es6.movemodule", RefactoringKind::MoveMethod),
    ("movemembers", RefactoringKind::MoveMethod),
    ("rename", RefactoringKind::Rename),
    ("renameelement", RefactoringKind::Rename),
    ("changesignature", RefactoringKind::ChangeSignature),
    ("safedelete", RefactoringKind::SafeDelete),
    ("extractinterface", RefactoringKind::IntroduceInterface),
    ("introduceparameterobject", RefactoringKind::IntroduceParameterObject),
    ("optimizeimports", RefactoringKind::OptimizeImports),
    ("reformatcode", RefactoringKind::ReformatCode),
];

/// Classify a raw identifier, or `None` when it is not a known refactoring
pub fn classify(raw_id: &str) -> Option<RefactoringKind> {
    classify_detailed(raw_id).map(|classification| classification.kind)
}

/// Classify and report which tier and rule produced the answer
pub fn classify_detailed(raw_id: &str) -> Option<Classification> {
    let trimmed = raw_id.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lowered = trimmed.to_lowercase();
    if let Some((literal, kind)) = EXACT_IDS.iter().find(|(literal, _)| *literal == lowered) {
        return Some(Classification {
            kind: *kind,
            tier: MatchTier::Exact,
            matched_by: literal,
        });
    }

    let normalized = normalize(&lowered);
    RULES
        .iter()
        .find(|rule| (rule.matches)(&normalized))
        .map(|rule| Classification {
            kind: rule.kind,
            tier: MatchTier::Keyword,
            matched_by: rule.name,
        })
}

/// Lowercase and collapse every run of `.`, `-`, `_` or whitespace into `_`
pub fn normalize(raw_id: &str) -> String {
    let mut normalized = String::with_capacity(raw_id.len());
    let mut pending_separator = false;

    for c in raw_id.chars() {
        if matches!(c, '.' | '-' | '_') || c.is_whitespace() {
            pending_separator = true;
            continue;
        }
        if pending_separator && !normalized.is_empty() {
            normalized.push('_');
        }
        pending_separator = false;
        normalized.extend(c.to_lowercase());
    }

    normalized
}

/// Whether an unclassified identifier still looks refactoring-related.
///
/// Used to pick the log level for misses: these are worth a warning because
/// they usually mean the tables above are missing an entry.
pub fn looks_like_refactoring(raw_id: &str) -> bool {
    const HINTS: &[&str] = &["extract", "refactor", "inline", "introduce", "rename"];
    let lowered = raw_id.to_lowercase();
    HINTS.iter().any(|hint| lowered.contains(hint))
}

#[cfg(test)]
mod tests {
    use super::*;
    use RefactoringKind as K;

    #[test]
    fn test_empty_and_blank_ids_are_unrecognized() {
        assert_eq!(classify(""), None);
        assert_eq!(classify("   "), None);
        assert_eq!(classify("..--__"), None);
    }

    #[test]
    fn test_extract_method_spellings() {
        for id in [
            "refactoring.extractMethod",
            "ExtractMethod",
            "refactoring.extractFunction",
            "refactoring.extract.function",
            "ExtractFunction",
            "IntroduceFunction",
            "Extract Method",
        ] {
            assert_eq!(classify(id), Some(K::ExtractMethod), "{id}");
        }
    }

    #[test]
    fn test_move_module_uses_exact_tier() {
        let classification = classify_detailed("refactoring.javascript.es6.moveModule").unwrap();
        assert_eq!(classification.kind, K::MoveMethod);
        assert_eq!(classification.tier, MatchTier::Exact);
    }

    #[test]
    fn test_move_module_has_no_keyword_match() {
        let normalized = normalize("refactoring.javascript.es6.moveModule");
        assert!(RULES.iter().all(|rule| !(rule.matches)(&normalized)));
    }

    #[test]
    fn test_inline_and_move_shortcuts() {
        assert_eq!(classify("Inline"), Some(K::InlineMethod));
        assert_eq!(classify("Move"), Some(K::MoveMethod));
        assert_eq!(classify("refactoring.inline.variable"), Some(K::InlineVariable));
        assert_eq!(classify("refactoring.inlineFunction"), Some(K::InlineMethod));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("RENAME"), Some(K::Rename));
        assert_eq!(classify("ReName"), Some(K::Rename));
        assert_eq!(classify("RenameElement"), Some(K::Rename));
    }

    #[test]
    fn test_property_and_field_variants() {
        assert_eq!(classify("refactoring.extract.property"), Some(K::ExtractField));
        assert_eq!(classify("refactoring.extractProperty"), Some(K::ExtractField));
        assert_eq!(classify("IntroduceProperty"), Some(K::ExtractField));
        assert_eq!(classify("refactoring.encapsulate.property"), Some(K::EncapsulateField));
        assert_eq!(classify("refactoring.encapsulateProperty"), Some(K::EncapsulateField));
    }

    #[test]
    fn test_class_moves_and_method_moves() {
        assert_eq!(classify("refactoring.move.method"), Some(K::MoveMethod));
        assert_eq!(classify("refactoring.moveFunction"), Some(K::MoveMethod));
        assert_eq!(classify("refactoring.move.class"), Some(K::MoveClass));
    }

    #[test]
    fn test_removals_are_not_moves() {
        assert_eq!(classify("refactoring.removeSettingMethod"), Some(K::RemoveSettingMethod));
        assert_eq!(classify("remove.unused.method"), Some(K::RemoveUnused));
        assert_eq!(classify("RemoveMethod"), None);
    }

    #[test]
    fn test_extract_class_is_not_extract_method() {
        assert_eq!(classify("refactoring.extractClass"), Some(K::ExtractClass));
        assert_eq!(classify("ExtractSuperclass"), Some(K::ExtractClass));
        assert_eq!(classify("extract.class.with.methods"), Some(K::ExtractClass));
    }

    #[test]
    fn test_unknown_ids() {
        assert_eq!(classify("unknown.refactoring"), None);
        assert_eq!(classify("EditorCopy"), None);
    }

    #[test]
    fn test_normalize_collapses_separators() {
        assert_eq!(normalize("refactoring..extract--Method"), "refactoring_extract_method");
        assert_eq!(normalize("_pull_up_"), "pull_up");
        assert_eq!(normalize("Extract   Method"), "extract_method");
    }

    #[test]
    fn test_looks_like_refactoring() {
        assert!(looks_like_refactoring("Kotlin.IntroduceTypeAlias"));
        assert!(!looks_like_refactoring("EditorCopy"));
    }

    #[test]
    fn test_exact_ids_are_lowercase() {
        for (literal, _) in EXACT_IDS {
            assert_eq!(*literal, literal.to_lowercase());
        }
    }
}

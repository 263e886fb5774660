//! Core domain types shared by every other module.

pub mod action;
pub mod kind;

pub use action::{
    DetectedAction, DetectionSource, RawDetection, MAX_ELEMENT_HINT_CHARS, UNKNOWN_ORIGIN,
};
pub use kind::{ActionCategory, KindInfo, RefactoringKind, KIND_TABLE};

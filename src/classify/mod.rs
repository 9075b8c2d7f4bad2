//! Trait classification: selected sources to closed per-category kinds.
//!
//! Classification happens exactly once per pass; everything downstream
//! dispatches on the resulting tags, never on the raw strings.

/// Per-category kind enums and the substring contract that produces them.
pub mod kinds;
/// The classified tag set and its cross-category predicates.
pub mod tags;

pub use kinds::{
    ClothesKind, EyesKind, FacialHairKind, HeadKind, MaskKind, MouthBaseKind, MouthItemKind,
};
pub use tags::{SelectionTags, classify_selection};

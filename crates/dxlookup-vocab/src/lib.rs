//! # dxlookup-vocab
//!
//! The two fixed vocabularies that frame every prediction:
//!
//! - [`SymptomVocabulary`] maps a symptom name to its feature-vector slot.
//! - [`DiseaseVocabulary`] maps a classifier label to a disease name.
//!
//! Both are loaded once at startup, either from the built-in tables or from a
//! TOML file (see [`loader`]), and are read-only afterwards.

pub mod builtin;
pub mod diseases;
pub mod loader;
pub mod symptoms;

pub use diseases::DiseaseVocabulary;
pub use loader::{Vocabularies, VocabularyFile};
pub use symptoms::SymptomVocabulary;

// ── Tests ─────────────────────────────────────────────────────────────────────

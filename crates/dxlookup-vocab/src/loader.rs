//! TOML vocabulary files.
//!
//! A deployment may ship its own classifier with its own feature layout. The
//! matching vocabularies are then supplied as a TOML document:
//!
//! ```toml
//! [symptoms]
//! itching = 0
//! skin_rash = 1
//! "spotting_ urination" = 2
//!
//! [[diseases]]
//! label = 15
//! name = "Fungal infection"
//! ```
//!
//! `[[diseases]]` order is the listing order reported to clients.

use std::{collections::HashMap, path::Path};

use serde::{Deserialize, Serialize};
use tracing::info;

use dxlookup_contracts::{
    error::{DxError, DxResult},
    features::ClassLabel,
};

use crate::{diseases::DiseaseVocabulary, symptoms::SymptomVocabulary};

/// One `[[diseases]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseEntry {
    pub label: u32,
    pub name: String,
}

/// The top-level structure deserialized from a vocabulary TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyFile {
    /// Symptom name → feature index.
    pub symptoms: HashMap<String, usize>,
    /// Disease entries in listing order.
    pub diseases: Vec<DiseaseEntry>,
}

/// Both vocabularies, loaded together so they always come from one source.
#[derive(Debug, Clone)]
pub struct Vocabularies {
    pub symptoms: SymptomVocabulary,
    pub diseases: DiseaseVocabulary,
}

impl Vocabularies {
    /// The built-in vocabularies.
    pub fn builtin() -> Self {
        Self {
            symptoms: SymptomVocabulary::builtin(),
            diseases: DiseaseVocabulary::builtin(),
        }
    }

    /// Parse `s` as a vocabulary TOML document and validate both tables.
    ///
    /// Returns `DxError::ConfigError` if the TOML is malformed, does not match
    /// `VocabularyFile`, or either table breaks its invariants.
    pub fn from_toml_str(s: &str) -> DxResult<Self> {
        let file: VocabularyFile = toml::from_str(s).map_err(|e| DxError::ConfigError {
            reason: format!("failed to parse vocabulary TOML: {}", e),
        })?;

        let symptoms = SymptomVocabulary::from_pairs(file.symptoms)?;
        let diseases = DiseaseVocabulary::from_entries(
            file.diseases
                .into_iter()
                .map(|d| (ClassLabel(d.label), d.name)),
        )?;

        Ok(Self { symptoms, diseases })
    }

    /// Read the file at `path` and parse it as a vocabulary document.
    pub fn from_file(path: &Path) -> DxResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| DxError::ConfigError {
            reason: format!("failed to read vocabulary file '{}': {}", path.display(), e),
        })?;
        let vocab = Self::from_toml_str(&contents)?;
        info!(
            path = %path.display(),
            symptoms = vocab.symptoms.len(),
            diseases = vocab.diseases.len(),
            "vocabulary loaded"
        );
        Ok(vocab)
    }

    /// Load from `path` when given, otherwise fall back to the built-ins.
    pub fn load(path: Option<&Path>) -> DxResult<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::builtin()),
        }
    }
}

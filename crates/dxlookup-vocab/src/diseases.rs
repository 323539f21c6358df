//! The Disease Vocabulary: classifier label → disease name.

use std::collections::HashMap;

use dxlookup_contracts::{
    error::{DxError, DxResult},
    features::ClassLabel,
};

use crate::builtin;

/// Fixed mapping from class label to disease display name.
///
/// Listing order is kept separately from label order so `names()` reproduces
/// the table exactly as it was declared.
#[derive(Debug, Clone)]
pub struct DiseaseVocabulary {
    entries: Vec<(ClassLabel, String)>,
    by_label: HashMap<ClassLabel, usize>,
}

impl DiseaseVocabulary {
    /// The 41-disease vocabulary the bundled classifier was trained on.
    pub fn builtin() -> Self {
        let entries: Vec<(ClassLabel, String)> = builtin::DISEASES
            .iter()
            .map(|(label, name)| (ClassLabel(*label), name.to_string()))
            .collect();
        let by_label = entries.iter().enumerate().map(|(i, (l, _))| (*l, i)).collect();
        Self { entries, by_label }
    }

    /// Build a vocabulary from `(label, name)` pairs, keeping their order.
    ///
    /// Returns `DxError::ConfigError` on a repeated label or an empty name.
    pub fn from_entries(entries: impl IntoIterator<Item = (ClassLabel, String)>) -> DxResult<Self> {
        let entries: Vec<(ClassLabel, String)> = entries.into_iter().collect();
        let mut by_label = HashMap::with_capacity(entries.len());

        for (pos, (label, name)) in entries.iter().enumerate() {
            if name.is_empty() {
                return Err(DxError::ConfigError {
                    reason: format!("disease with label {label} has an empty name"),
                });
            }
            if by_label.insert(*label, pos).is_some() {
                return Err(DxError::ConfigError {
                    reason: format!("disease label {label} is listed more than once"),
                });
            }
        }

        Ok(Self { entries, by_label })
    }

    /// Disease name for `label`, if the label is mapped.
    pub fn name_of(&self, label: ClassLabel) -> Option<&str> {
        self.by_label
            .get(&label)
            .map(|pos| self.entries[*pos].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All disease names in listing order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, n)| n.as_str())
    }

    /// All mapped labels in listing order.
    pub fn labels(&self) -> impl Iterator<Item = ClassLabel> + '_ {
        self.entries.iter().map(|(l, _)| *l)
    }
}

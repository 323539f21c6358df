//! The Symptom Vocabulary: symptom name → dense feature index.

use std::collections::HashMap;

use dxlookup_contracts::error::{DxError, DxResult};

use crate::builtin;

/// Fixed mapping from symptom name to feature index `0..N`.
///
/// Indices are dense and unique; the constructor rejects anything else.
#[derive(Debug, Clone)]
pub struct SymptomVocabulary {
    /// Names in index order: `names[i]` owns feature slot `i`.
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl SymptomVocabulary {
    /// The 132-symptom vocabulary the bundled classifier expects.
    pub fn builtin() -> Self {
        let names: Vec<String> = builtin::SYMPTOMS.iter().map(|s| s.to_string()).collect();
        let index = names.iter().enumerate().map(|(i, n)| (n.clone(), i)).collect();
        Self { names, index }
    }

    /// Build a vocabulary from `(name, index)` pairs in any order.
    ///
    /// Returns `DxError::ConfigError` when a name repeats, an index repeats,
    /// or the indices do not cover exactly `0..N`.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, usize)>) -> DxResult<Self> {
        let mut pairs: Vec<(String, usize)> = pairs.into_iter().collect();
        pairs.sort_by_key(|(_, idx)| *idx);

        let mut names = Vec::with_capacity(pairs.len());
        let mut index = HashMap::with_capacity(pairs.len());

        for (expected, (name, idx)) in pairs.into_iter().enumerate() {
            if idx != expected {
                return Err(DxError::ConfigError {
                    reason: format!(
                        "symptom indices must be dense from 0: expected index {expected}, found {idx} for '{name}'"
                    ),
                });
            }
            if name.is_empty() {
                return Err(DxError::ConfigError {
                    reason: format!("symptom at index {idx} has an empty name"),
                });
            }
            if index.insert(name.clone(), idx).is_some() {
                return Err(DxError::ConfigError {
                    reason: format!("symptom '{name}' is listed more than once"),
                });
            }
            names.push(name);
        }

        Ok(Self { names, index })
    }

    /// Feature index of `name`, if it is in the vocabulary.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Vocabulary size N, which is also the feature-vector length.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All symptom names in index order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

//! Feature vectors and classifier labels.
//!
//! A `FeatureVector` is the only thing that crosses into the classifier: one
//! slot per vocabulary symptom, `1.0` when the symptom was reported and `0.0`
//! otherwise. It is built once per prediction and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Integer class label as produced by a classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassLabel(pub u32);

impl std::fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Binary presence vector over the Symptom Vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    slots: Vec<f64>,
}

impl FeatureVector {
    /// Build a vector of length `len` with a `1.0` at every index in `present`.
    ///
    /// Repeated indices are idempotent. Returns `None` if any index is
    /// `>= len`; no partially-built vector is ever observable.
    pub fn from_present(len: usize, present: impl IntoIterator<Item = usize>) -> Option<Self> {
        let mut slots = vec![0.0; len];
        for idx in present {
            *slots.get_mut(idx)? = 1.0;
        }
        Some(Self { slots })
    }

    /// Number of slots (the vocabulary size).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Raw slot values, in vocabulary index order.
    pub fn as_slice(&self) -> &[f64] {
        &self.slots
    }

    /// Return true if the slot at `idx` is set.
    pub fn is_present(&self, idx: usize) -> bool {
        self.slots.get(idx).is_some_and(|v| *v != 0.0)
    }

    /// Indices of all set slots, ascending.
    pub fn present_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0.0)
            .map(|(i, _)| i)
    }
}

//! The serialized classifier artifact.
//!
//! A linear multi-class model exported to JSON:
//!
//! ```json
//! {
//!   "model_name": "svc-linear",
//!   "n_features": 132,
//!   "classes": [0, 1, 2],
//!   "strategy": "one_vs_one",
//!   "coef": [[...], [...], [...]],
//!   "intercept": [0.1, -0.3, 0.2]
//! }
//! ```
//!
//! Row layout of `coef`/`intercept` depends on `strategy`:
//!
//! - `one_vs_rest`: one row per class, in `classes` order.
//! - `one_vs_one`: one row per class pair `(i, j)` with `i < j`, ordered
//!   `(0,1), (0,2), …, (0,k-1), (1,2), …`. A positive decision value votes
//!   for `classes[i]`, anything else votes for `classes[j]`.

use serde::{Deserialize, Serialize};

use dxlookup_contracts::error::{DxError, DxResult};

/// How per-row decision values become a single class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStrategy {
    /// Highest score wins; the earliest class wins a tie.
    OneVsRest,
    /// Pairwise voting; the earliest class wins a tie on votes.
    #[default]
    OneVsOne,
}

/// Deserialized contents of a classifier artifact file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModelArtifact {
    pub model_name: String,
    pub n_features: usize,
    /// Class labels in the classifier's internal order.
    pub classes: Vec<u32>,
    #[serde(default)]
    pub strategy: DecisionStrategy,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

impl LinearModelArtifact {
    /// Number of decision rows `strategy` requires for `classes`.
    pub fn expected_rows(&self) -> usize {
        let k = self.classes.len();
        match self.strategy {
            DecisionStrategy::OneVsRest => k,
            DecisionStrategy::OneVsOne => k * k.saturating_sub(1) / 2,
        }
    }

    /// Check that every shape in the artifact agrees with every other.
    ///
    /// Returns `DxError::ArtifactError` naming the first mismatch found.
    pub fn validate(&self) -> DxResult<()> {
        let fail = |reason: String| Err(DxError::ArtifactError { reason });

        if self.classes.is_empty() {
            return fail(format!("model '{}' declares no classes", self.model_name));
        }
        let mut sorted = self.classes.clone();
        sorted.sort_unstable();
        if sorted.windows(2).any(|w| w[0] == w[1]) {
            return fail(format!("model '{}' repeats a class label", self.model_name));
        }

        let rows = self.expected_rows();
        if self.coef.len() != rows {
            return fail(format!(
                "model '{}' has {} coefficient rows, {:?} over {} classes needs {}",
                self.model_name,
                self.coef.len(),
                self.strategy,
                self.classes.len(),
                rows
            ));
        }
        if self.intercept.len() != rows {
            return fail(format!(
                "model '{}' has {} intercepts, expected {}",
                self.model_name,
                self.intercept.len(),
                rows
            ));
        }
        if let Some((i, row)) = self
            .coef
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != self.n_features)
        {
            return fail(format!(
                "model '{}' coefficient row {} has {} values, expected {}",
                self.model_name,
                i,
                row.len(),
                self.n_features
            ));
        }
        Ok(())
    }
}

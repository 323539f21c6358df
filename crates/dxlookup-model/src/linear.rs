//! Linear multi-class classifier evaluated from a `LinearModelArtifact`.

use dxlookup_contracts::{
    error::{DxError, DxResult},
    features::{ClassLabel, FeatureVector},
};
use dxlookup_core::traits::Classifier;

use crate::{
    artifact::{DecisionStrategy, LinearModelArtifact},
    exclusive::StatefulClassifier,
};

/// A validated linear model. Immutable, so concurrent `classify` calls are safe.
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    artifact: LinearModelArtifact,
}

impl LinearClassifier {
    /// Validate `artifact` and wrap it.
    pub fn from_artifact(artifact: LinearModelArtifact) -> DxResult<Self> {
        artifact.validate()?;
        Ok(Self { artifact })
    }

    pub fn strategy(&self) -> DecisionStrategy {
        self.artifact.strategy
    }

    pub fn classes(&self) -> &[u32] {
        &self.artifact.classes
    }

    /// Raw decision value of every row for `x`.
    fn decision_values(&self, x: &[f64]) -> Vec<f64> {
        self.artifact
            .coef
            .iter()
            .zip(&self.artifact.intercept)
            .map(|(row, b)| row.iter().zip(x).map(|(w, v)| w * v).sum::<f64>() + b)
            .collect()
    }

    /// Position in `classes` of the first maximum of `values`.
    fn first_argmax<T: PartialOrd + Copy>(values: &[T]) -> usize {
        let mut best = 0;
        for (i, v) in values.iter().enumerate().skip(1) {
            if *v > values[best] {
                best = i;
            }
        }
        best
    }

    fn pick(&self, x: &[f64]) -> usize {
        let decisions = self.decision_values(x);
        match self.artifact.strategy {
            DecisionStrategy::OneVsRest => Self::first_argmax(&decisions),
            DecisionStrategy::OneVsOne => {
                let k = self.artifact.classes.len();
                let mut votes = vec![0u32; k];
                let mut row = 0;
                for i in 0..k {
                    for j in (i + 1)..k {
                        if decisions[row] > 0.0 {
                            votes[i] += 1;
                        } else {
                            votes[j] += 1;
                        }
                        row += 1;
                    }
                }
                Self::first_argmax(&votes)
            }
        }
    }
}

impl Classifier for LinearClassifier {
    fn name(&self) -> &str {
        &self.artifact.model_name
    }

    fn n_features(&self) -> usize {
        self.artifact.n_features
    }

    fn classify(&self, features: &FeatureVector) -> DxResult<ClassLabel> {
        if features.len() != self.artifact.n_features {
            return Err(DxError::InferenceFailed {
                reason: format!(
                    "model '{}' expects {} features, got {}",
                    self.artifact.model_name,
                    self.artifact.n_features,
                    features.len()
                ),
            });
        }
        let pos = self.pick(features.as_slice());
        Ok(ClassLabel(self.artifact.classes[pos]))
    }
}

impl StatefulClassifier for LinearClassifier {
    fn name(&self) -> &str {
        Classifier::name(self)
    }

    fn n_features(&self) -> usize {
        Classifier::n_features(self)
    }

    fn classify_mut(&mut self, features: &FeatureVector) -> DxResult<ClassLabel> {
        self.classify(features)
    }
}

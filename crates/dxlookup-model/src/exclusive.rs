//! Exclusive-access wrapper for backends that cannot infer concurrently.
//!
//! Some inference runtimes keep scratch buffers or session state and need
//! `&mut self` to run. `ExclusiveClassifier` puts such a backend behind a
//! `Mutex` so it satisfies the shared, read-only `Classifier` contract: calls
//! from concurrent requests are serialized, one inference at a time.

use std::sync::Mutex;

use tracing::error;

use dxlookup_contracts::{
    error::{DxError, DxResult},
    features::{ClassLabel, FeatureVector},
};
use dxlookup_core::traits::Classifier;

/// A classifier that needs exclusive access to run inference.
pub trait StatefulClassifier: Send {
    fn name(&self) -> &str;

    fn n_features(&self) -> usize;

    fn classify_mut(&mut self, features: &FeatureVector) -> DxResult<ClassLabel>;
}

/// Serializes access to a `StatefulClassifier`.
pub struct ExclusiveClassifier<C: StatefulClassifier> {
    name: String,
    n_features: usize,
    inner: Mutex<C>,
}

impl<C: StatefulClassifier> ExclusiveClassifier<C> {
    pub fn new(inner: C) -> Self {
        Self {
            name: inner.name().to_string(),
            n_features: inner.n_features(),
            inner: Mutex::new(inner),
        }
    }
}

impl<C: StatefulClassifier> Classifier for ExclusiveClassifier<C> {
    fn name(&self) -> &str {
        &self.name
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    /// Run inference while holding the lock.
    ///
    /// A poisoned lock means an earlier inference panicked mid-call; the
    /// backend state can no longer be trusted, so the classifier reports
    /// itself unavailable.
    fn classify(&self, features: &FeatureVector) -> DxResult<ClassLabel> {
        let mut inner = self.inner.lock().map_err(|e| {
            error!(classifier = %self.name, "classifier lock poisoned");
            DxError::ClassifierUnavailable {
                reason: format!("classifier '{}' lock poisoned: {}", self.name, e),
            }
        })?;
        inner.classify_mut(features)
    }
}

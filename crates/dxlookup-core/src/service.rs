//! The diagnosis service: the core-facing half of the service boundary.
//!
//! Combines a `Predictor` with an `InfoSource` and owns the one policy the
//! resolver deliberately leaves to its caller: an empty description means
//! the disease was not found.

use std::sync::Arc;

use tracing::debug;

use dxlookup_contracts::{
    disease::{Diagnosis, DiseaseInfo},
    error::{DxError, DxResult},
};

use crate::{predictor::Predictor, traits::InfoSource};

/// Predict-then-resolve, plus direct metadata lookups.
#[derive(Clone)]
pub struct DiagnosisService {
    predictor: Arc<Predictor>,
    info: Arc<dyn InfoSource>,
}

impl DiagnosisService {
    pub fn new(predictor: Arc<Predictor>, info: Arc<dyn InfoSource>) -> Self {
        Self { predictor, info }
    }

    pub fn predictor(&self) -> &Predictor {
        &self.predictor
    }

    /// Predict a disease for `symptoms` and attach its metadata.
    ///
    /// The metadata is returned as resolved, even when the predicted disease
    /// has no description row.
    pub fn diagnose<S: AsRef<str>>(&self, symptoms: &[S]) -> DxResult<Diagnosis> {
        let prediction = self.predictor.predict(symptoms)?;
        let info = self.info.resolve(&prediction.disease);
        if info.is_unknown() {
            debug!(disease = %prediction.disease, "predicted disease has no description row");
        }
        Ok(Diagnosis { prediction, info })
    }

    /// Resolve metadata for any disease name.
    ///
    /// Returns `DxError::DiseaseNotFound` when the description lookup is
    /// empty, regardless of what the other four tables returned.
    pub fn disease_info(&self, name: &str) -> DxResult<DiseaseInfo> {
        let info = self.info.resolve(name);
        if info.is_unknown() {
            debug!(disease = %name, "disease info lookup found no description");
            return Err(DxError::DiseaseNotFound {
                name: name.to_string(),
            });
        }
        Ok(info)
    }
}

impl std::fmt::Debug for DiagnosisService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosisService")
            .field("predictor", &self.predictor)
            .finish_non_exhaustive()
    }
}

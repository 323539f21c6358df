//! Prediction results and the disease info bundle.

use serde::{Deserialize, Serialize};

use crate::features::ClassLabel;

/// Identifier attached to one prediction request for log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PredictionId(pub uuid::Uuid);

impl PredictionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for PredictionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PredictionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The outcome of `Predictor::predict`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    /// Label the classifier returned.
    pub label: ClassLabel,
    /// Disease name the label resolves to in the Disease Vocabulary.
    pub disease: String,
}

/// Everything the metadata tables hold about one disease.
///
/// Built on demand per lookup. An empty `description` means the disease is
/// unknown to the description table; the other fields are filled
/// independently and may still be non-empty in that case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseInfo {
    /// All matching description rows joined with a single space.
    pub description: String,
    /// Up to four non-empty precautions from the first matching row.
    pub precautions: Vec<String>,
    pub medications: Vec<String>,
    pub diet: Vec<String>,
    pub workout: Vec<String>,
}

impl DiseaseInfo {
    /// Return true when the description table had no row for the disease.
    pub fn is_unknown(&self) -> bool {
        self.description.is_empty()
    }
}

/// A prediction together with the metadata for the predicted disease.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub prediction: Prediction,
    pub info: DiseaseInfo,
}

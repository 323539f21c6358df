//! The two seams between lookup logic and its data sources.
//!
//! - `Classifier`: opaque inference backend, loaded once, read-only after
//! - `InfoSource`: metadata join over the static tables
//!
//! The predictor and the diagnosis service only ever see these traits, so
//! the inference backend and the table storage can change without touching
//! either.

use dxlookup_contracts::{
    disease::DiseaseInfo,
    error::DxResult,
    features::{ClassLabel, FeatureVector},
};

/// A pre-trained classifier mapping a feature vector to a class label.
///
/// Implementations must be deterministic: the same vector always yields the
/// same label. `classify` takes `&self` and the trait requires `Sync`, so
/// many requests may call it at once. A backend that cannot run concurrent
/// inference must serialize itself (see `ExclusiveClassifier` in
/// dxlookup-model) before it is handed to the predictor.
pub trait Classifier: Send + Sync {
    /// Human-readable model identifier for health reporting and logs.
    fn name(&self) -> &str;

    /// Length of the feature vector this classifier expects.
    fn n_features(&self) -> usize;

    /// Return the class label for `features`.
    ///
    /// Returns `DxError::InferenceFailed` if the vector is unusable (for
    /// example its length differs from `n_features()`).
    fn classify(&self, features: &FeatureVector) -> DxResult<ClassLabel>;
}

/// Read-only metadata lookup keyed by disease name.
///
/// Absence is not an error here: an unknown name produces a `DiseaseInfo`
/// with an empty description, and the caller decides what that means.
pub trait InfoSource: Send + Sync {
    /// Assemble the info bundle for `disease` by exact name match.
    fn resolve(&self, disease: &str) -> DiseaseInfo;
}

//! The predictor: symptom names in, disease name out.
//!
//! Every call runs the same fixed pipeline:
//!
//!   Validate → Vectorize → Classify → Resolve label
//!
//! Validation runs before anything else, so malformed input is rejected the
//! same way whether or not a classifier is loaded.

use std::{collections::HashSet, sync::Arc};

use tracing::{debug, error};

use dxlookup_contracts::{
    disease::Prediction,
    error::{DxError, DxResult},
    features::FeatureVector,
};
use dxlookup_vocab::{DiseaseVocabulary, SymptomVocabulary, Vocabularies};

use crate::traits::Classifier;

/// Outcome of loading the classifier at startup.
#[derive(Clone)]
pub enum ClassifierHandle {
    /// A usable classifier.
    Loaded(Arc<dyn Classifier>),
    /// Loading failed; every prediction fails with this reason.
    Unavailable { reason: String },
}

impl std::fmt::Debug for ClassifierHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loaded(c) => f.debug_tuple("Loaded").field(&c.name()).finish(),
            Self::Unavailable { reason } => {
                f.debug_struct("Unavailable").field("reason", reason).finish()
            }
        }
    }
}

/// Converts symptom lists into disease predictions.
///
/// Holds only read-only state. Construct once at startup and share it
/// behind an `Arc`.
#[derive(Debug)]
pub struct Predictor {
    symptoms: SymptomVocabulary,
    diseases: DiseaseVocabulary,
    classifier: ClassifierHandle,
}

impl Predictor {
    /// Create a predictor over `vocab` using `classifier`.
    ///
    /// A loaded classifier whose `n_features()` differs from the symptom
    /// vocabulary size is downgraded to `Unavailable`: it would never receive
    /// a vector it can use.
    pub fn new(vocab: Vocabularies, classifier: ClassifierHandle) -> Self {
        let classifier = match classifier {
            ClassifierHandle::Loaded(c) if c.n_features() != vocab.symptoms.len() => {
                let reason = format!(
                    "classifier '{}' expects {} features but the symptom vocabulary has {}",
                    c.name(),
                    c.n_features(),
                    vocab.symptoms.len()
                );
                error!(%reason, "classifier does not match vocabulary");
                ClassifierHandle::Unavailable { reason }
            }
            other => other,
        };

        Self {
            symptoms: vocab.symptoms,
            diseases: vocab.diseases,
            classifier,
        }
    }

    /// True when a classifier is loaded and predictions can run.
    pub fn is_ready(&self) -> bool {
        matches!(self.classifier, ClassifierHandle::Loaded(_))
    }

    /// Name of the loaded classifier, if any.
    pub fn classifier_name(&self) -> Option<&str> {
        match &self.classifier {
            ClassifierHandle::Loaded(c) => Some(c.name()),
            ClassifierHandle::Unavailable { .. } => None,
        }
    }

    /// Why predictions cannot run, when no classifier is usable.
    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.classifier {
            ClassifierHandle::Loaded(_) => None,
            ClassifierHandle::Unavailable { reason } => Some(reason),
        }
    }

    pub fn symptoms(&self) -> &SymptomVocabulary {
        &self.symptoms
    }

    pub fn diseases(&self) -> &DiseaseVocabulary {
        &self.diseases
    }

    /// Check `names` against the Symptom Vocabulary and return their indices.
    ///
    /// # Errors
    ///
    /// - `EmptySymptoms` when `names` is empty
    /// - `UnrecognizedSymptoms` listing every unknown name once, in the
    ///   order first seen
    pub fn validate<S: AsRef<str>>(&self, names: &[S]) -> DxResult<Vec<usize>> {
        if names.is_empty() {
            debug!("prediction rejected: no symptoms");
            return Err(DxError::EmptySymptoms);
        }

        let mut indices = Vec::with_capacity(names.len());
        let mut unknown: Vec<String> = Vec::new();
        let mut seen_unknown = HashSet::new();

        for name in names {
            let name = name.as_ref();
            match self.symptoms.index_of(name) {
                Some(idx) => indices.push(idx),
                None => {
                    if seen_unknown.insert(name) {
                        unknown.push(name.to_string());
                    }
                }
            }
        }

        if !unknown.is_empty() {
            debug!(unrecognized = ?unknown, "prediction rejected: unrecognized symptoms");
            return Err(DxError::UnrecognizedSymptoms { symptoms: unknown });
        }

        Ok(indices)
    }

    /// Validate `names` and build the feature vector for them.
    pub fn vectorize<S: AsRef<str>>(&self, names: &[S]) -> DxResult<FeatureVector> {
        let indices = self.validate(names)?;
        FeatureVector::from_present(self.symptoms.len(), indices).ok_or_else(|| {
            DxError::InferenceFailed {
                reason: "symptom index outside the vocabulary range".to_string(),
            }
        })
    }

    /// Predict the disease for `names`.
    ///
    /// # Errors
    ///
    /// Returns client-input errors from `validate` first. Then
    /// `ClassifierUnavailable` if no classifier is loaded, any error from the
    /// classifier itself, and `UnmappedLabel` if the label is not in the
    /// Disease Vocabulary.
    pub fn predict<S: AsRef<str>>(&self, names: &[S]) -> DxResult<Prediction> {
        let features = self.vectorize(names)?;

        let classifier = match &self.classifier {
            ClassifierHandle::Loaded(c) => c,
            ClassifierHandle::Unavailable { reason } => {
                return Err(DxError::ClassifierUnavailable {
                    reason: reason.clone(),
                });
            }
        };

        let label = classifier.classify(&features)?;

        let disease = self.diseases.name_of(label).ok_or_else(|| {
            error!(
                label = %label,
                classifier = %classifier.name(),
                "classifier produced a label missing from the disease vocabulary"
            );
            DxError::UnmappedLabel { label: label.0 }
        })?;

        debug!(
            label = %label,
            disease = %disease,
            present = features.present_indices().count(),
            "prediction complete"
        );

        Ok(Prediction {
            label,
            disease: disease.to_string(),
        })
    }
}

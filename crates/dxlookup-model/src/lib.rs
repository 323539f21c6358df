//! # dxlookup-model
//!
//! Concrete [`Classifier`](dxlookup_core::traits::Classifier) backends.
//!
//! The trained model ships as a JSON artifact describing a linear
//! multi-class classifier (see [`artifact`]). [`loader::load_classifier`]
//! reads it, optionally checks its SHA-256 against a pinned digest, validates
//! every shape, and returns a handle the predictor can use.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use dxlookup_model::{load_classifier, LoadOptions};
//!
//! let (handle, status) = load_classifier(Path::new("models/classifier.json"), &LoadOptions::default());
//! let predictor = Predictor::new(vocab, handle);
//! ```

pub mod artifact;
pub mod exclusive;
pub mod linear;
pub mod loader;

pub use artifact::{DecisionStrategy, LinearModelArtifact};
pub use exclusive::{ExclusiveClassifier, StatefulClassifier};
pub use linear::LinearClassifier;
pub use loader::{artifact_digest, load_classifier, parse_artifact, LoadOptions, ModelStatus};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use serde_json::json;

    use dxlookup_contracts::{
        error::{DxError, DxResult},
        features::{ClassLabel, FeatureVector},
    };
    use dxlookup_core::{traits::Classifier, ClassifierHandle};

    use super::*;

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// One-vs-rest over 132 features: indices 0, 1, 2 push towards label 15,
    /// everything else falls back to label 4 through its intercept.
    fn skin_fixture() -> serde_json::Value {
        let mut fungal = vec![0.0; 132];
        fungal[0] = 1.0;
        fungal[1] = 1.0;
        fungal[2] = 1.0;
        json!({
            "model_name": "skin-fixture",
            "n_features": 132,
            "classes": [15, 4],
            "strategy": "one_vs_rest",
            "coef": [fungal, vec![0.0; 132]],
            "intercept": [0.0, 0.5]
        })
    }

    /// Three classes over three features, pairwise rows (0,1), (0,2), (1,2).
    fn pairwise_fixture(intercept: [f64; 3], zero_coef: bool) -> LinearClassifier {
        let coef = if zero_coef {
            vec![vec![0.0; 3]; 3]
        } else {
            vec![vec![1.0, -1.0, 0.0], vec![1.0, 0.0, -1.0], vec![0.0, 1.0, -1.0]]
        };
        LinearClassifier::from_artifact(LinearModelArtifact {
            model_name: "pairwise".to_string(),
            n_features: 3,
            classes: vec![10, 20, 30],
            strategy: DecisionStrategy::OneVsOne,
            coef,
            intercept: intercept.to_vec(),
        })
        .unwrap()
    }

    fn vector(len: usize, present: &[usize]) -> FeatureVector {
        FeatureVector::from_present(len, present.iter().copied()).unwrap()
    }

    fn write_artifact(dir: &tempfile::TempDir, value: &serde_json::Value) -> std::path::PathBuf {
        let path = dir.path().join("classifier.json");
        std::fs::write(&path, serde_json::to_vec(value).unwrap()).unwrap();
        path
    }

    // ── Artifact validation ───────────────────────────────────────────────────

    #[test]
    fn strategy_defaults_to_one_vs_one() {
        let artifact: LinearModelArtifact = serde_json::from_value(json!({
            "model_name": "m",
            "n_features": 2,
            "classes": [0, 1],
            "coef": [[1.0, 0.0]],
            "intercept": [0.0]
        }))
        .unwrap();
        assert_eq!(artifact.strategy, DecisionStrategy::OneVsOne);
        assert!(artifact.validate().is_ok());
    }

    #[test]
    fn wrong_row_count_is_rejected() {
        let artifact = LinearModelArtifact {
            model_name: "m".to_string(),
            n_features: 2,
            classes: vec![0, 1, 2],
            strategy: DecisionStrategy::OneVsOne,
            coef: vec![vec![0.0, 0.0]; 2],
            intercept: vec![0.0; 2],
        };
        match artifact.validate() {
            Err(DxError::ArtifactError { reason }) => assert!(reason.contains("needs 3"), "got: {reason}"),
            other => panic!("expected ArtifactError, got {:?}", other),
        }
    }

    #[test]
    fn short_coefficient_row_is_rejected() {
        let artifact = LinearModelArtifact {
            model_name: "m".to_string(),
            n_features: 3,
            classes: vec![0, 1],
            strategy: DecisionStrategy::OneVsRest,
            coef: vec![vec![0.0; 3], vec![0.0; 2]],
            intercept: vec![0.0; 2],
        };
        match artifact.validate() {
            Err(DxError::ArtifactError { reason }) => assert!(reason.contains("row 1"), "got: {reason}"),
            other => panic!("expected ArtifactError, got {:?}", other),
        }
    }

    #[test]
    fn repeated_class_label_is_rejected() {
        let artifact = LinearModelArtifact {
            model_name: "m".to_string(),
            n_features: 1,
            classes: vec![3, 3],
            strategy: DecisionStrategy::OneVsRest,
            coef: vec![vec![0.0]; 2],
            intercept: vec![0.0; 2],
        };
        assert!(matches!(artifact.validate(), Err(DxError::ArtifactError { .. })));
    }

    // ── Linear inference ──────────────────────────────────────────────────────

    #[test]
    fn one_vs_rest_picks_highest_score() {
        let model = parse_artifact(&serde_json::to_vec(&skin_fixture()).unwrap()).unwrap();

        assert_eq!(model.classify(&vector(132, &[0, 1, 2])).unwrap(), ClassLabel(15));
        assert_eq!(model.classify(&vector(132, &[5])).unwrap(), ClassLabel(4));
    }

    #[test]
    fn one_vs_rest_tie_goes_to_first_class() {
        let model = LinearClassifier::from_artifact(LinearModelArtifact {
            model_name: "tie".to_string(),
            n_features: 1,
            classes: vec![8, 2],
            strategy: DecisionStrategy::OneVsRest,
            coef: vec![vec![0.0], vec![0.0]],
            intercept: vec![1.0, 1.0],
        })
        .unwrap();
        assert_eq!(model.classify(&vector(1, &[])).unwrap(), ClassLabel(8));
    }

    #[test]
    fn one_vs_one_votes_pairwise() {
        let model = pairwise_fixture([0.0; 3], false);

        assert_eq!(model.classify(&vector(3, &[0])).unwrap(), ClassLabel(10));
        assert_eq!(model.classify(&vector(3, &[1])).unwrap(), ClassLabel(20));
        assert_eq!(model.classify(&vector(3, &[2])).unwrap(), ClassLabel(30));
    }

    /// Votes [1, 1, 1]: the lowest class index wins.
    #[test]
    fn one_vs_one_vote_tie_goes_to_first_class() {
        let model = pairwise_fixture([1.0, -1.0, 1.0], true);
        assert_eq!(model.classify(&vector(3, &[])).unwrap(), ClassLabel(10));
    }

    #[test]
    fn wrong_vector_width_fails_inference() {
        let model = pairwise_fixture([0.0; 3], false);
        match model.classify(&vector(4, &[0])) {
            Err(DxError::InferenceFailed { reason }) => assert!(reason.contains("expects 3")),
            other => panic!("expected InferenceFailed, got {:?}", other),
        }
    }

    #[test]
    fn classification_is_deterministic() {
        let model = parse_artifact(&serde_json::to_vec(&skin_fixture()).unwrap()).unwrap();
        let v = vector(132, &[0, 1, 2]);
        let first = model.classify(&v).unwrap();
        for _ in 0..20 {
            assert_eq!(model.classify(&v).unwrap(), first);
        }
    }

    // ── ExclusiveClassifier ───────────────────────────────────────────────────

    /// A backend that mutates itself on every call.
    struct CountingBackend {
        calls: usize,
        total: Arc<AtomicUsize>,
    }

    impl StatefulClassifier for CountingBackend {
        fn name(&self) -> &str {
            "counting"
        }

        fn n_features(&self) -> usize {
            2
        }

        fn classify_mut(&mut self, _features: &FeatureVector) -> DxResult<ClassLabel> {
            self.calls += 1;
            self.total.fetch_add(1, Ordering::SeqCst);
            Ok(ClassLabel(self.calls as u32))
        }
    }

    #[test]
    fn exclusive_classifier_serializes_concurrent_calls() {
        let total = Arc::new(AtomicUsize::new(0));
        let classifier = Arc::new(ExclusiveClassifier::new(CountingBackend {
            calls: 0,
            total: Arc::clone(&total),
        }));
        let v = vector(2, &[0]);

        std::thread::scope(|s| {
            for _ in 0..4 {
                let c = Arc::clone(&classifier);
                let v = v.clone();
                s.spawn(move || {
                    for _ in 0..50 {
                        c.classify(&v).unwrap();
                    }
                });
            }
        });

        assert_eq!(total.load(Ordering::SeqCst), 200);
        // The backend saw every call exactly once, in sequence.
        assert_eq!(classifier.classify(&v).unwrap(), ClassLabel(201));
        assert_eq!(classifier.name(), "counting");
        assert_eq!(classifier.n_features(), 2);
    }

    struct PanickingBackend;

    impl StatefulClassifier for PanickingBackend {
        fn name(&self) -> &str {
            "panicking"
        }

        fn n_features(&self) -> usize {
            1
        }

        fn classify_mut(&mut self, _features: &FeatureVector) -> DxResult<ClassLabel> {
            panic!("backend crashed");
        }
    }

    #[test]
    fn poisoned_exclusive_classifier_reports_unavailable() {
        let classifier = Arc::new(ExclusiveClassifier::new(PanickingBackend));
        let v = vector(1, &[]);

        let c = Arc::clone(&classifier);
        let v2 = v.clone();
        let crashed = std::thread::spawn(move || c.classify(&v2)).join();
        assert!(crashed.is_err());

        assert!(matches!(
            classifier.classify(&v),
            Err(DxError::ClassifierUnavailable { .. })
        ));
    }

    // ── Loader ────────────────────────────────────────────────────────────────

    #[test]
    fn load_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let (handle, status) =
            load_classifier(&dir.path().join("absent.json"), &LoadOptions::default());

        assert!(matches!(handle, ClassifierHandle::Unavailable { .. }));
        assert!(!status.loaded);
        assert!(status.sha256.is_none());
        assert!(status.error.unwrap().contains("failed to read"));
    }

    #[test]
    fn load_valid_artifact_reports_digest() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_artifact(&dir, &skin_fixture());
        let expected = artifact_digest(&std::fs::read(&path).unwrap());

        let (handle, status) = load_classifier(&path, &LoadOptions::default());

        assert!(matches!(handle, ClassifierHandle::Loaded(_)));
        assert!(status.loaded);
        assert_eq!(status.model_name.as_deref(), Some("skin-fixture"));
        assert_eq!(status.sha256, Some(expected));
        assert!(status.loaded_at.is_some());
        assert!(status.error.is_none());
    }

    #[test]
    fn load_with_matching_pinned_digest_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_artifact(&dir, &skin_fixture());
        let digest = artifact_digest(&std::fs::read(&path).unwrap());

        let options = LoadOptions {
            expected_sha256: Some(digest.to_uppercase()),
            exclusive_access: false,
        };
        let (handle, _) = load_classifier(&path, &options);
        assert!(matches!(handle, ClassifierHandle::Loaded(_)));
    }

    #[test]
    fn load_with_mismatched_digest_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_artifact(&dir, &skin_fixture());

        let options = LoadOptions {
            expected_sha256: Some("00".repeat(32)),
            exclusive_access: false,
        };
        let (handle, status) = load_classifier(&path, &options);

        match handle {
            ClassifierHandle::Unavailable { reason } => assert!(reason.contains("mismatch")),
            other => panic!("expected Unavailable, got {:?}", other),
        }
        assert!(status.sha256.is_some(), "digest is still reported when the file was read");
    }

    #[test]
    fn load_malformed_json_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classifier.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let (handle, status) = load_classifier(&path, &LoadOptions::default());
        assert!(matches!(handle, ClassifierHandle::Unavailable { .. }));
        assert!(status.error.unwrap().contains("failed to parse classifier JSON"));
    }

    #[test]
    fn load_with_exclusive_access_still_classifies() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_artifact(&dir, &skin_fixture());

        let options = LoadOptions {
            expected_sha256: None,
            exclusive_access: true,
        };
        match load_classifier(&path, &options).0 {
            ClassifierHandle::Loaded(c) => {
                assert_eq!(c.name(), "skin-fixture");
                assert_eq!(c.classify(&vector(132, &[0, 1, 2])).unwrap(), ClassLabel(15));
            }
            other => panic!("expected Loaded, got {:?}", other),
        }
    }
}

//! Loading the classifier artifact from disk.
//!
//! Loading never aborts the process. A missing, tampered or malformed
//! artifact produces `ClassifierHandle::Unavailable` and a `ModelStatus`
//! that says why; the service keeps running and reports it on `/health`.

use std::{path::Path, sync::Arc};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{error, info, warn};

use dxlookup_contracts::error::{DxError, DxResult};
use dxlookup_core::{traits::Classifier, ClassifierHandle};

use crate::{
    artifact::LinearModelArtifact, exclusive::ExclusiveClassifier, linear::LinearClassifier,
};

/// Options controlling how an artifact is loaded.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Expected SHA-256 of the artifact bytes, hex encoded. Case-insensitive.
    pub expected_sha256: Option<String>,
    /// Wrap the classifier in `ExclusiveClassifier` so inference is serialized.
    pub exclusive_access: bool,
}

/// What happened when the classifier was loaded, for health reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelStatus {
    pub loaded: bool,
    pub model_name: Option<String>,
    /// Hex SHA-256 of the artifact bytes, when the file could be read.
    pub sha256: Option<String>,
    pub loaded_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

/// Lowercase hex SHA-256 of `bytes`.
pub fn artifact_digest(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Parse and validate an artifact held in memory.
pub fn parse_artifact(bytes: &[u8]) -> DxResult<LinearClassifier> {
    let artifact: LinearModelArtifact =
        serde_json::from_slice(bytes).map_err(|e| DxError::ArtifactError {
            reason: format!("failed to parse classifier JSON: {}", e),
        })?;
    LinearClassifier::from_artifact(artifact)
}

fn check_digest(digest: &str, expected: Option<&str>) -> DxResult<()> {
    match expected {
        Some(want) if !want.trim().eq_ignore_ascii_case(digest) => {
            Err(DxError::ArtifactError {
                reason: format!(
                    "artifact SHA-256 mismatch: expected {}, computed {}",
                    want.trim(),
                    digest
                ),
            })
        }
        _ => Ok(()),
    }
}

/// Load the artifact at `path`.
///
/// Always returns a handle and a matching status; failures are logged and
/// folded into `ClassifierHandle::Unavailable`.
pub fn load_classifier(path: &Path, options: &LoadOptions) -> (ClassifierHandle, ModelStatus) {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            let reason = format!("failed to read classifier artifact '{}': {}", path.display(), e);
            error!(path = %path.display(), %reason, "classifier not loaded");
            return unavailable(reason, None);
        }
    };

    let digest = artifact_digest(&bytes);
    if options.expected_sha256.is_none() {
        warn!(path = %path.display(), sha256 = %digest, "no expected digest configured; artifact integrity not checked");
    }

    let loaded = check_digest(&digest, options.expected_sha256.as_deref())
        .and_then(|()| parse_artifact(&bytes));

    let linear = match loaded {
        Ok(c) => c,
        Err(e) => {
            let reason = e.to_string();
            error!(path = %path.display(), %reason, "classifier not loaded");
            return unavailable(reason, Some(digest));
        }
    };

    let name = Classifier::name(&linear).to_string();
    let classifier: Arc<dyn Classifier> = if options.exclusive_access {
        Arc::new(ExclusiveClassifier::new(linear))
    } else {
        Arc::new(linear)
    };

    info!(
        path = %path.display(),
        model = %name,
        n_features = classifier.n_features(),
        sha256 = %digest,
        exclusive = options.exclusive_access,
        "classifier loaded"
    );

    let status = ModelStatus {
        loaded: true,
        model_name: Some(name),
        sha256: Some(digest),
        loaded_at: Some(Utc::now()),
        error: None,
    };
    (ClassifierHandle::Loaded(classifier), status)
}

fn unavailable(reason: String, sha256: Option<String>) -> (ClassifierHandle, ModelStatus) {
    let status = ModelStatus {
        loaded: false,
        model_name: None,
        sha256,
        loaded_at: None,
        error: Some(reason.clone()),
    };
    (ClassifierHandle::Unavailable { reason }, status)
}

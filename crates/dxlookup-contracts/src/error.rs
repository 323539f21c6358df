//! Error taxonomy for the dxlookup service.
//!
//! Every fallible operation returns `DxResult<T>`. Variants carry the values
//! the caller needs to act on (the offending symptom names, the unmapped
//! label) so the service boundary can surface them without re-deriving
//! anything.

use thiserror::Error;

/// The unified error type for dxlookup.
#[derive(Debug, Error)]
pub enum DxError {
    /// A prediction was requested with no symptoms at all.
    #[error("No symptoms provided")]
    EmptySymptoms,

    /// One or more requested symptom names are not in the Symptom Vocabulary.
    ///
    /// `symptoms` lists each offending name once, in first-seen order.
    #[error("Invalid symptoms: {symptoms:?}. Use /symptoms endpoint to get valid symptoms.")]
    UnrecognizedSymptoms { symptoms: Vec<String> },

    /// The classifier failed to load at startup, so no prediction can run.
    #[error("classifier unavailable: {reason}")]
    ClassifierUnavailable { reason: String },

    /// The classifier produced a label the Disease Vocabulary does not know.
    ///
    /// Means the classifier artifact and the vocabulary are not a matched pair.
    #[error("classifier produced label {label} which has no entry in the disease vocabulary")]
    UnmappedLabel { label: u32 },

    /// The classifier rejected a feature vector during inference.
    #[error("inference failed: {reason}")]
    InferenceFailed { reason: String },

    /// A metadata lookup found no description for the disease name.
    #[error("Disease '{name}' not found")]
    DiseaseNotFound { name: String },

    /// A configuration or vocabulary file is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// One of the metadata tables could not be read or lacks a required column.
    #[error("dataset '{table}' could not be loaded: {reason}")]
    DatasetError { table: String, reason: String },

    /// The serialized classifier artifact is unreadable or malformed.
    #[error("classifier artifact error: {reason}")]
    ArtifactError { reason: String },

    /// A result could not be encoded for output.
    #[error("output error: {reason}")]
    OutputError { reason: String },
}

/// Broad category of a `DxError`, used by callers to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller sent something invalid. Not retried.
    ClientInput,
    /// A required component (the classifier) is not loaded.
    ServiceUnavailable,
    /// Loaded data disagrees with itself. Fatal to the request.
    DataIntegrity,
    /// The requested disease has no metadata.
    NotFound,
    /// Configuration, dataset or artifact loading failed.
    Startup,
    /// A fault in the service itself, unrelated to inputs or loaded data.
    Internal,
}

impl DxError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptySymptoms | Self::UnrecognizedSymptoms { .. } => ErrorKind::ClientInput,
            Self::ClassifierUnavailable { .. } => ErrorKind::ServiceUnavailable,
            Self::UnmappedLabel { .. } | Self::InferenceFailed { .. } => ErrorKind::DataIntegrity,
            Self::DiseaseNotFound { .. } => ErrorKind::NotFound,
            Self::ConfigError { .. } | Self::DatasetError { .. } | Self::ArtifactError { .. } => {
                ErrorKind::Startup
            }
            Self::OutputError { .. } => ErrorKind::Internal,
        }
    }
}

/// Convenience alias used throughout the dxlookup crates.
pub type DxResult<T> = Result<T, DxError>;

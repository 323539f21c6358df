//! Startup: everything the request handlers share.
//!
//! Vocabulary and dataset failures abort startup. A classifier that fails to
//! load does not: the service comes up, `/health` reports the reason and
//! `/predict` answers 503.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use dxlookup_contracts::error::DxResult;
use dxlookup_core::{traits::InfoSource, ClassifierHandle, DiagnosisService, Predictor};
use dxlookup_metadata::MetadataTables;
use dxlookup_model::{load_classifier, ModelStatus};
use dxlookup_vocab::Vocabularies;

use crate::config::ServiceConfig;

/// Shared, read-only application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: DiagnosisService,
    pub model: Arc<ModelStatus>,
    /// `(table, rows)` for each metadata table, when loaded from disk.
    pub datasets: Vec<(String, usize)>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Wire a predictor and metadata source into a servable state.
    ///
    /// `model` is reconciled with the predictor: a classifier the predictor
    /// refused is reported as not loaded.
    pub fn new(
        vocab: Vocabularies,
        classifier: ClassifierHandle,
        mut model: ModelStatus,
        info: Arc<dyn InfoSource>,
    ) -> Self {
        let predictor = Predictor::new(vocab, classifier);
        if let Some(reason) = predictor.unavailable_reason() {
            if model.loaded {
                model.loaded = false;
                model.loaded_at = None;
            }
            if model.error.is_none() {
                model.error = Some(reason.to_string());
            }
        }

        Self {
            service: DiagnosisService::new(Arc::new(predictor), info),
            model: Arc::new(model),
            datasets: Vec::new(),
            started_at: Utc::now(),
        }
    }

    /// Load vocabularies, datasets and the classifier named by `config`.
    ///
    /// # Errors
    ///
    /// Vocabulary or dataset errors. Classifier problems are never returned.
    pub fn load(config: &ServiceConfig) -> DxResult<Self> {
        let vocab = Vocabularies::load(config.vocabulary_path.as_deref())?;
        info!(
            symptoms = vocab.symptoms.len(),
            diseases = vocab.diseases.len(),
            custom = config.vocabulary_path.is_some(),
            "vocabularies loaded"
        );

        let tables = MetadataTables::load(&config.datasets)?;
        let datasets = tables
            .summary()
            .into_iter()
            .map(|(name, rows)| (name.to_string(), rows))
            .collect();

        let (classifier, model) = load_classifier(&config.model.path, &config.model.load_options());
        if !model.loaded {
            warn!("starting without a classifier; predictions will be refused");
        }

        Ok(Self {
            datasets,
            ..Self::new(vocab, classifier, model, Arc::new(tables))
        })
    }

    pub fn model_loaded(&self) -> bool {
        self.service.predictor().is_ready()
    }
}

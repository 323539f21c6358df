//! # dxlookup-core
//!
//! Lookup logic for the dxlookup service.
//!
//! This crate provides:
//! - The two seam traits (`Classifier`, `InfoSource`)
//! - The `Predictor` that turns symptom names into a disease prediction
//! - The `DiagnosisService` that joins predictions with metadata
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dxlookup_core::{ClassifierHandle, DiagnosisService, Predictor};
//!
//! let predictor = Predictor::new(Vocabularies::builtin(), ClassifierHandle::Loaded(model));
//! let service = DiagnosisService::new(Arc::new(predictor), Arc::new(tables));
//! let diagnosis = service.diagnose(&["itching", "skin_rash"])?;
//! ```

pub mod predictor;
pub mod service;
pub mod traits;

pub use predictor::{ClassifierHandle, Predictor};
pub use service::DiagnosisService;

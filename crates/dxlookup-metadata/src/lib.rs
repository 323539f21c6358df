//! # dxlookup-metadata
//!
//! The five static metadata tables (description, precautions, medications,
//! diet, workout) and the resolver that joins them into a
//! [`DiseaseInfo`](dxlookup_contracts::disease::DiseaseInfo).
//!
//! [`MetadataTables`] implements
//! [`InfoSource`](dxlookup_core::traits::InfoSource). Tables are read from
//! CSV once at startup; the disease key column is normalized during that
//! read so that joins are uniform.

pub mod table;
pub mod tables;

pub use table::{Row, Table, TableSpec};
pub use tables::{DatasetFiles, MetadataTables};

// ── Tests ─────────────────────────────────────────────────────────────────────

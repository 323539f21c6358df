//! The five metadata tables and the resolver that joins them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use dxlookup_contracts::{disease::DiseaseInfo, error::DxResult};
use dxlookup_core::traits::InfoSource;

use crate::table::{Table, TableSpec};

pub const DESCRIPTION: TableSpec = TableSpec {
    name: "description",
    value_columns: &["Description"],
};

pub const PRECAUTIONS: TableSpec = TableSpec {
    name: "precautions",
    value_columns: &["Precaution_1", "Precaution_2", "Precaution_3", "Precaution_4"],
};

pub const MEDICATIONS: TableSpec = TableSpec {
    name: "medications",
    value_columns: &["Medication"],
};

pub const DIETS: TableSpec = TableSpec {
    name: "diets",
    value_columns: &["Diet"],
};

pub const WORKOUT: TableSpec = TableSpec {
    name: "workout",
    value_columns: &["workout"],
};

/// File names of the five tables, relative to a datasets directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetFiles {
    pub dir: PathBuf,
    pub description: String,
    pub precautions: String,
    pub medications: String,
    pub diets: String,
    pub workout: String,
}

impl Default for DatasetFiles {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("datasets"),
            description: "description.csv".to_string(),
            precautions: "precautions_df.csv".to_string(),
            medications: "medications.csv".to_string(),
            diets: "diets.csv".to_string(),
            workout: "workout_df.csv".to_string(),
        }
    }
}

impl DatasetFiles {
    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }
}

/// All five tables, loaded once and read-only afterwards.
#[derive(Debug, Clone)]
pub struct MetadataTables {
    description: Table,
    precautions: Table,
    medications: Table,
    diets: Table,
    workout: Table,
}

impl MetadataTables {
    /// Assemble from already-parsed tables.
    pub fn new(
        description: Table,
        precautions: Table,
        medications: Table,
        diets: Table,
        workout: Table,
    ) -> Self {
        Self {
            description,
            precautions,
            medications,
            diets,
            workout,
        }
    }

    /// Load every table listed in `files`. The first failure aborts the load.
    pub fn load(files: &DatasetFiles) -> DxResult<Self> {
        let tables = Self::new(
            Table::from_path(DESCRIPTION, &files.path(&files.description))?,
            Table::from_path(PRECAUTIONS, &files.path(&files.precautions))?,
            Table::from_path(MEDICATIONS, &files.path(&files.medications))?,
            Table::from_path(DIETS, &files.path(&files.diets))?,
            Table::from_path(WORKOUT, &files.path(&files.workout))?,
        );
        info!(
            dir = %files.dir.display(),
            description = tables.description.len(),
            precautions = tables.precautions.len(),
            medications = tables.medications.len(),
            diets = tables.diets.len(),
            workout = tables.workout.len(),
            "metadata tables loaded"
        );
        Ok(tables)
    }

    /// Load all tables from the default file names inside `dir`.
    pub fn load_dir(dir: &Path) -> DxResult<Self> {
        Self::load(&DatasetFiles {
            dir: dir.to_path_buf(),
            ..DatasetFiles::default()
        })
    }

    /// `(table name, row count)` for each table, in join order.
    pub fn summary(&self) -> Vec<(&str, usize)> {
        [
            &self.description,
            &self.precautions,
            &self.medications,
            &self.diets,
            &self.workout,
        ]
        .into_iter()
        .map(|t| (t.name(), t.len()))
        .collect()
    }

    /// Every present first-column value across all matching rows, in order.
    fn column_values(table: &Table, disease: &str) -> Vec<String> {
        table
            .matching(disease)
            .filter_map(|row| row.values.first().cloned().flatten())
            .collect()
    }
}

impl InfoSource for MetadataTables {
    /// Join the five tables on `disease`.
    ///
    /// - description: all matching rows joined with one space
    /// - precautions: the first matching row's four columns, missing ones dropped
    /// - medications, diet, workout: every present value across matching rows
    fn resolve(&self, disease: &str) -> DiseaseInfo {
        let description = Self::column_values(&self.description, disease).join(" ");

        let precautions = self
            .precautions
            .matching(disease)
            .next()
            .map(|row| row.values.iter().flatten().cloned().collect())
            .unwrap_or_default();

        DiseaseInfo {
            description,
            precautions,
            medications: Self::column_values(&self.medications, disease),
            diet: Self::column_values(&self.diets, disease),
            workout: Self::column_values(&self.workout, disease),
        }
    }
}

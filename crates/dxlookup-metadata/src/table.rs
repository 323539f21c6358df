//! One metadata table, reduced to a disease key plus the value columns the
//! resolver reads.
//!
//! The source files disagree on how they spell the disease column
//! (`Disease` in four of them, `disease` in the workout table). Header
//! matching is ASCII case-insensitive and happens once at load time; after
//! that every table exposes the same `disease` field and the resolver never
//! special-cases a table.

use std::{io::Read, path::Path};

use tracing::debug;

use dxlookup_contracts::error::{DxError, DxResult};

/// Header name of the join key, compared case-insensitively.
pub const DISEASE_KEY: &str = "disease";

/// Cell values read as "no value", matching the missing-value markers the
/// datasets were exported with.
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Return the cell as an owned value, or `None` when it marks a missing value.
fn cell(raw: &str) -> Option<String> {
    if MISSING_MARKERS.contains(&raw) {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Which columns to pull out of a table.
#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    /// Table name used in logs and errors.
    pub name: &'static str,
    /// Value column headers, in the order the resolver wants them.
    pub value_columns: &'static [&'static str],
}

/// A single row: the disease key and the requested value cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub disease: String,
    /// One entry per `TableSpec::value_columns`; `None` for missing cells.
    pub values: Vec<Option<String>>,
}

/// A loaded table, rows in file order.
#[derive(Debug, Clone)]
pub struct Table {
    name: &'static str,
    rows: Vec<Row>,
}

impl Table {
    /// Read CSV from `reader`, keeping the disease key and `spec`'s columns.
    ///
    /// Rows whose disease cell is missing can never match a lookup and are
    /// dropped.
    ///
    /// # Errors
    ///
    /// `DxError::DatasetError` when the CSV is malformed, not UTF-8, or lacks
    /// the disease column or any requested value column.
    pub fn from_reader<R: Read>(spec: TableSpec, reader: R) -> DxResult<Self> {
        let fail = |reason: String| DxError::DatasetError {
            table: spec.name.to_string(),
            reason,
        };

        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers = rdr
            .headers()
            .map_err(|e| fail(format!("failed to read header row: {}", e)))?
            .clone();

        let find = |column: &str| {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(column))
                .ok_or_else(|| fail(format!("missing column '{}'", column)))
        };

        let key_idx = find(DISEASE_KEY)?;
        let value_idx: Vec<usize> = spec
            .value_columns
            .iter()
            .map(|c| find(*c))
            .collect::<DxResult<_>>()?;

        let mut rows = Vec::new();
        for (line, record) in rdr.records().enumerate() {
            let record = record.map_err(|e| fail(format!("record {}: {}", line + 1, e)))?;
            let Some(disease) = record.get(key_idx).and_then(cell) else {
                continue;
            };
            let values = value_idx
                .iter()
                .map(|i| record.get(*i).and_then(cell))
                .collect();
            rows.push(Row { disease, values });
        }

        debug!(table = spec.name, rows = rows.len(), "metadata table parsed");
        Ok(Self {
            name: spec.name,
            rows,
        })
    }

    /// Open and read the CSV file at `path`.
    pub fn from_path(spec: TableSpec, path: &Path) -> DxResult<Self> {
        let file = std::fs::File::open(path).map_err(|e| DxError::DatasetError {
            table: spec.name.to_string(),
            reason: format!("failed to open '{}': {}", path.display(), e),
        })?;
        Self::from_reader(spec, file)
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows whose disease equals `disease` exactly, in file order.
    pub fn matching<'a>(&'a self, disease: &'a str) -> impl Iterator<Item = &'a Row> + 'a {
        self.rows.iter().filter(move |r| r.disease == disease)
    }
}

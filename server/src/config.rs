//! Service configuration.
//!
//! Read from a TOML file; every field has a default so an empty file (or no
//! file at all) yields a runnable configuration:
//!
//! ```toml
//! bind = "0.0.0.0:8000"
//! log_level = "info"
//! vocabulary_path = "vocabulary.toml"   # optional, built-ins otherwise
//!
//! [datasets]
//! dir = "datasets"
//! workout = "workout_df.csv"
//!
//! [model]
//! path = "models/classifier.json"
//! sha256 = "9f86d08…"                     # optional integrity pin
//! exclusive_access = false
//!
//! [cors]
//! allowed_origins = ["http://localhost:3000"]
//! ```
//!
//! Relative paths in a config file are resolved against the file's directory.

use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use dxlookup_contracts::error::{DxError, DxResult};
use dxlookup_metadata::DatasetFiles;
use dxlookup_model::LoadOptions;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the JSON classifier artifact.
    pub path: PathBuf,
    /// Expected hex SHA-256 of the artifact.
    pub sha256: Option<String>,
    /// Serialize inference behind a lock.
    pub exclusive_access: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("models/classifier.json"),
            sha256: None,
            exclusive_access: false,
        }
    }
}

impl ModelConfig {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            expected_sha256: self.sha256.clone(),
            exclusive_access: self.exclusive_access,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Origins allowed to call the API from a browser. `"*"` allows any.
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

/// Top-level configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub bind: String,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
    pub vocabulary_path: Option<PathBuf>,
    pub datasets: DatasetFiles,
    pub model: ModelConfig,
    pub cors: CorsConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8000".to_string(),
            log_level: "info".to_string(),
            vocabulary_path: None,
            datasets: DatasetFiles::default(),
            model: ModelConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Parse `s` as a TOML configuration document.
    ///
    /// Returns `DxError::ConfigError` if the TOML is malformed or has fields
    /// of the wrong type.
    pub fn from_toml_str(s: &str) -> DxResult<Self> {
        toml::from_str(s).map_err(|e| DxError::ConfigError {
            reason: format!("failed to parse config TOML: {}", e),
        })
    }

    /// Read and parse the file at `path`, resolving its relative paths
    /// against the file's directory.
    pub fn from_file(path: &Path) -> DxResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| DxError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        let config = Self::from_toml_str(&contents)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.relative_to(base))
    }

    /// Load from `path` when given, otherwise use the defaults.
    pub fn load(path: Option<&Path>) -> DxResult<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    /// Rebase every relative path onto `base`.
    pub fn relative_to(mut self, base: &Path) -> Self {
        let rebase = |p: &Path| {
            if p.is_relative() {
                base.join(p)
            } else {
                p.to_path_buf()
            }
        };
        self.datasets.dir = rebase(&self.datasets.dir);
        self.model.path = rebase(&self.model.path);
        self.vocabulary_path = self.vocabulary_path.as_deref().map(rebase);
        self
    }

    /// The listen address.
    pub fn bind_addr(&self) -> DxResult<SocketAddr> {
        self.bind.parse().map_err(|e| DxError::ConfigError {
            reason: format!("invalid bind address '{}': {}", self.bind, e),
        })
    }
}

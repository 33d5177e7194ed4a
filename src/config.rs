//! YAML configuration for dataset and artifact locations.
//!
//! The configuration file is passed explicitly on the command line; there is
//! no implicit working-directory lookup. Relative paths inside the file are
//! resolved against the directory containing the file, so a config travels
//! with its data.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ModelError, Result};
use crate::model::ModelKind;

/// Filesystem locations of the three dataset splits.
#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    /// Training split CSV
    pub data_train: PathBuf,
    /// Validation split CSV
    pub data_val: PathBuf,
    /// Test split CSV
    pub data_test: PathBuf,
}

/// Filesystem locations of the persisted model artifacts.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelPaths {
    /// Logistic regression artifact
    pub logreg_model: PathBuf,
    /// K-nearest-neighbors artifact
    pub knn_model: PathBuf,
    /// Decision tree artifact
    pub dectree_model: PathBuf,
}

/// Top-level configuration loaded from a YAML file.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataPaths,
    pub models: ModelPaths,
}

impl Config {
    /// Load configuration from a YAML file.
    ///
    /// Missing or malformed keys fail here with a configuration error, not
    /// later at first use. Relative paths are rebased onto the config file's
    /// parent directory.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ModelError::Configuration(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let mut config = Self::parse(&contents).map_err(|e| {
            ModelError::Configuration(format!("in config file '{}': {}", path.display(), e))
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.rebase(base);
        Ok(config)
    }

    /// Parse configuration from a YAML string without path rebasing.
    pub fn parse(contents: &str) -> Result<Self> {
        serde_yaml::from_str(contents)
            .map_err(|e| ModelError::Configuration(format!("failed to parse config: {}", e)))
    }

    /// Path of the persisted artifact for a model kind.
    pub fn model_path(&self, kind: ModelKind) -> &Path {
        match kind {
            ModelKind::Logistic => &self.models.logreg_model,
            ModelKind::Knn => &self.models.knn_model,
            ModelKind::DecisionTree => &self.models.dectree_model,
        }
    }

    fn rebase(&mut self, base: &Path) {
        for path in [
            &mut self.data.data_train,
            &mut self.data.data_val,
            &mut self.data.data_test,
            &mut self.models.logreg_model,
            &mut self.models.knn_model,
            &mut self.models.dectree_model,
        ] {
            if path.is_relative() {
                *path = base.join(path.as_path());
            }
        }
    }
}

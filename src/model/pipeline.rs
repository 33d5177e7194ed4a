//! The model pipeline contract: fit, predict, persist, reload.
//!
//! A pipeline is the atomic (optional transform, estimator) pair. Both
//! stages are fit together on the same training rows, exactly once per
//! `fit` call, and serialized as a single object so transform and estimator
//! parameters can never come from different fits. Persistence writes a temp
//! file in the destination directory and renames it into place, so the
//! artifact on disk is always a complete old or new version.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::model::estimator::FittedEstimator;
use crate::model::kind::ModelKind;
use crate::model::scaler::FittedScaler;
use crate::pipeline::assemble::FeatureMatrix;

/// A fitted (transform, estimator) pair.
#[derive(Serialize, Deserialize)]
pub struct ModelPipeline {
    transform: Option<FittedScaler>,
    estimator: FittedEstimator,
}

impl ModelPipeline {
    /// Fit a fresh pipeline for a model kind.
    ///
    /// Builds a brand-new transform+estimator pair every call; there is no
    /// incremental fitting. The transform (when the kind has one) learns its
    /// parameters from the same rows the estimator trains on.
    pub fn fit(kind: ModelKind, features: &FeatureMatrix, labels: &[usize]) -> Result<Self> {
        if features.rows() == 0 {
            return Err(ModelError::Data(
                "training set is empty after normalization and deduplication".to_string(),
            ));
        }

        let transform = match kind.scaler() {
            Some(scaler_kind) => Some(FittedScaler::fit(
                scaler_kind,
                features,
                &kind.scaled_columns(),
            )?),
            None => None,
        };

        let scaled;
        let estimator_input = match &transform {
            Some(scaler) => {
                scaled = scaler.transform(features)?;
                &scaled
            }
            None => features,
        };

        let estimator = FittedEstimator::fit(kind, &estimator_input.values, labels)?;
        Ok(Self {
            transform,
            estimator,
        })
    }

    /// Predict binary labels, aligned 1:1 with the input rows.
    pub fn predict(&self, features: &FeatureMatrix) -> Result<Vec<usize>> {
        let scaled;
        let input = match &self.transform {
            Some(scaler) => {
                scaled = scaler.transform(features)?;
                &scaled
            }
            None => features,
        };
        self.estimator.predict(&input.values)
    }

    /// The model kind this pipeline was fit for.
    pub fn kind(&self) -> ModelKind {
        self.estimator.kind()
    }

    /// Whether the pipeline carries a fitted transform stage.
    pub fn has_transform(&self) -> bool {
        self.transform.is_some()
    }

    /// Persist the pipeline to the given path, overwriting any prior
    /// artifact.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let bytes = bincode::serialize(self).map_err(|e| {
            ModelError::Data(format!("failed to serialize model pipeline: {}", e))
        })?;

        // Write next to the destination, then rename into place
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                ModelError::Configuration(format!("invalid artifact path '{}'", path.display()))
            })?;
        let tmp = path.with_file_name(format!("{}.tmp", file_name));
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Load a previously persisted pipeline.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ModelError::ArtifactNotFound {
                path: path.to_path_buf(),
            });
        }

        let bytes = fs::read(path)?;
        bincode::deserialize(&bytes).map_err(|e| ModelError::ArtifactCorrupt {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

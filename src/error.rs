//! Error taxonomy for training, persistence, and prediction.
//!
//! Every failure surfaces as one of four kinds so callers can branch on
//! what went wrong instead of matching on message text: bad configuration,
//! bad data, a model that was never saved, or a saved model that no longer
//! deserializes.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the lendcast library.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Required configuration key absent, unreadable, or malformed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Source file unreadable, schema mismatch, or a dataset that is
    /// unusable after label normalization.
    #[error("data error: {0}")]
    Data(String),

    /// `predict` was invoked before any successful `train --save` for this
    /// model kind.
    #[error("model artifact not found at '{path}' - train the model with --save first")]
    ArtifactNotFound {
        /// Configured artifact path that was checked
        path: PathBuf,
    },

    /// The persisted artifact exists but fails to deserialize into a
    /// transform+estimator pipeline.
    #[error("model artifact at '{path}' is corrupt: {reason}")]
    ArtifactCorrupt {
        /// Configured artifact path that was read
        path: PathBuf,
        /// Detailed decode failure
        reason: String,
    },
}

impl From<polars::prelude::PolarsError> for ModelError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        ModelError::Data(err.to_string())
    }
}

impl From<std::io::Error> for ModelError {
    fn from(err: std::io::Error) -> Self {
        ModelError::Data(format!("I/O error: {}", err))
    }
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, ModelError>;

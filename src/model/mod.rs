//! Model module - the pipeline contract and its three instantiations

pub mod estimator;
pub mod kind;
pub mod pipeline;
pub mod scaler;

pub use estimator::*;
pub use kind::*;
pub use pipeline::*;
pub use scaler::*;

use polars::prelude::DataFrame;

use crate::config::Config;
use crate::error::Result;
use crate::pipeline::assemble::{assemble_training, to_feature_matrix, Assembled, FeatureMatrix};
use crate::pipeline::preprocess::preprocess;

/// Train a fresh pipeline for a model kind on its configured splits.
///
/// Returns the fitted pipeline and the assembled training data (for drop
/// accounting). When `save` is set the pipeline is also persisted to the
/// kind's configured artifact path, silently overwriting any prior
/// artifact; the fitted pipeline is returned either way.
pub fn train(config: &Config, kind: ModelKind, save: bool) -> Result<(ModelPipeline, Assembled)> {
    let assembled = assemble_training(config, kind.assembly_policy())?;
    let fitted = ModelPipeline::fit(kind, &assembled.features, &assembled.labels)?;

    if save {
        fitted.save(config.model_path(kind))?;
    }

    Ok((fitted, assembled))
}

/// Predict labels for new raw input using the persisted artifact.
///
/// The artifact is reloaded fresh from the configured path on every call; a
/// pipeline that was trained but never saved cannot serve predictions. When
/// `preprocess_input` is set (the default for raw data) the input goes
/// through the same preprocessing as every training split.
pub fn predict(
    config: &Config,
    kind: ModelKind,
    input: &DataFrame,
    preprocess_input: bool,
) -> Result<Vec<usize>> {
    let prepared = if preprocess_input {
        preprocess(input)?
    } else {
        input.clone()
    };
    let features = to_feature_matrix(&prepared)?;
    predict_features(config, kind, &features)
}

/// Predict labels for an already-assembled feature matrix.
pub fn predict_features(
    config: &Config,
    kind: ModelKind,
    features: &FeatureMatrix,
) -> Result<Vec<usize>> {
    let pipeline = ModelPipeline::load(config.model_path(kind))?;
    pipeline.predict(features)
}

//! Dataset assembly: which rows and columns reach each model kind.
//!
//! Every split goes through the same sequence - normalize labels, preprocess,
//! deduplicate - before being split into a feature matrix and a label vector.
//! The one per-kind difference is the assembly policy: logistic regression
//! trains on the train split alone, while KNN and the decision tree train on
//! the row-wise union of train and validation. That asymmetry is a modeling
//! choice and is preserved here, not generalized away.
//!
//! Union ordering: train and validation are concatenated first, then the
//! union is deduplicated, so duplicate rows spanning the two splits collapse
//! to a single training row.

use std::path::Path;

use ndarray::Array2;
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::error::{ModelError, Result};
use crate::pipeline::label::{extract_labels, normalize_labels, LabelMapping, LABEL_COLUMN};
use crate::pipeline::loader::load_split;
use crate::pipeline::preprocess::{preprocess, FEATURE_COLUMNS};

/// Which dataset splits form the training set for a model kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyPolicy {
    /// Train split only (logistic regression)
    TrainOnly,
    /// Row-wise union of train and validation (KNN, decision tree)
    TrainPlusValidation,
}

/// Numeric feature block with its column names.
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    /// Column names, in matrix column order
    pub columns: Vec<String>,
    /// Row-major feature values
    pub values: Array2<f64>,
}

impl FeatureMatrix {
    pub fn rows(&self) -> usize {
        self.values.nrows()
    }
}

/// An assembled (features, labels) pair with drop accounting.
#[derive(Debug)]
pub struct Assembled {
    pub features: FeatureMatrix,
    pub labels: Vec<usize>,
    /// Rows excluded because the outcome matched neither mapping value
    pub dropped_unlabeled: usize,
    /// Exact-duplicate rows removed after assembly
    pub dropped_duplicates: usize,
}

impl Assembled {
    pub fn rows(&self) -> usize {
        self.labels.len()
    }
}

/// Assemble the training set for a model kind's policy.
pub fn assemble_training(config: &Config, policy: AssemblyPolicy) -> Result<Assembled> {
    let mapping = LabelMapping::default();

    let (train, mut dropped) = prepare_split(&config.data.data_train, &mapping)?;
    let combined = match policy {
        AssemblyPolicy::TrainOnly => train,
        AssemblyPolicy::TrainPlusValidation => {
            let (val, dropped_val) = prepare_split(&config.data.data_val, &mapping)?;
            dropped += dropped_val;
            train.vstack(&val)?
        }
    };

    finish(combined, dropped)
}

/// Load the test split and optionally draw a random subsample of `n` rows.
///
/// With `n = 0` the full normalized, deduplicated split is returned. The
/// sample is drawn without replacement; pass a seed for a reproducible draw.
pub fn sample_test(config: &Config, n: usize, seed: Option<u64>) -> Result<Assembled> {
    let mapping = LabelMapping::default();
    let (df, dropped) = prepare_split(&config.data.data_test, &mapping)?;

    let deduped = dedupe(&df)?;
    let dropped_duplicates = df.height() - deduped.height();

    let sampled = if n == 0 {
        deduped
    } else {
        if n > deduped.height() {
            return Err(ModelError::Data(format!(
                "requested a sample of {} rows but the test split has only {} usable rows",
                n,
                deduped.height()
            )));
        }
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let indices: Vec<IdxSize> = rand::seq::index::sample(&mut rng, deduped.height(), n)
            .into_iter()
            .map(|i| i as IdxSize)
            .collect();
        deduped.take(&IdxCa::from_vec("idx".into(), indices))?
    };

    let (features, labels) = split_features(&sampled)?;
    Ok(Assembled {
        features,
        labels,
        dropped_unlabeled: dropped,
        dropped_duplicates,
    })
}

/// Load, label-normalize, and preprocess a single split.
fn prepare_split(path: &Path, mapping: &LabelMapping) -> Result<(DataFrame, usize)> {
    let df = load_split(path)?;
    let (normalized, dropped) = normalize_labels(&df, mapping)?;
    let prepared = preprocess(&normalized)?;
    Ok((prepared, dropped))
}

fn finish(df: DataFrame, dropped_unlabeled: usize) -> Result<Assembled> {
    let deduped = dedupe(&df)?;
    let dropped_duplicates = df.height() - deduped.height();
    let (features, labels) = split_features(&deduped)?;
    Ok(Assembled {
        features,
        labels,
        dropped_unlabeled,
        dropped_duplicates,
    })
}

/// Remove exact-row duplicates, keeping first occurrences in order.
pub fn dedupe(df: &DataFrame) -> Result<DataFrame> {
    Ok(df.unique_stable(None, UniqueKeepStrategy::First, None)?)
}

/// Split a normalized frame into its feature matrix and label vector.
pub fn split_features(df: &DataFrame) -> Result<(FeatureMatrix, Vec<usize>)> {
    let labels = extract_labels(df)?;
    let features = to_feature_matrix(&df.drop(LABEL_COLUMN)?)?;
    Ok((features, labels))
}

/// Convert the feature columns of a preprocessed frame into a dense matrix.
pub fn to_feature_matrix(df: &DataFrame) -> Result<FeatureMatrix> {
    let rows = df.height();
    let mut columns = Vec::with_capacity(FEATURE_COLUMNS.len());
    let mut data: Vec<Vec<f64>> = Vec::with_capacity(FEATURE_COLUMNS.len());

    for name in FEATURE_COLUMNS {
        let series = df
            .column(name)
            .map_err(|_| ModelError::Data(format!("feature column '{}' not found", name)))?
            .as_materialized_series()
            .clone();
        let chunked = series.f64().map_err(|_| {
            ModelError::Data(format!(
                "feature column '{}' is not Float64 - was the input preprocessed?",
                name
            ))
        })?;
        if chunked.null_count() > 0 {
            return Err(ModelError::Data(format!(
                "feature column '{}' contains missing values",
                name
            )));
        }
        data.push(chunked.into_no_null_iter().collect());
        columns.push(name.to_string());
    }

    let values = Array2::from_shape_fn((rows, columns.len()), |(r, c)| data[c][r]);
    Ok(FeatureMatrix { columns, values })
}

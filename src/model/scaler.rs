//! Stateful feature scalers fit on training data and reapplied at predict
//! time.
//!
//! Both scalers are linear: `scaled = (value - offset) / scale`, with
//! per-column parameters learned once during `fit`. Z-score uses mean and
//! standard deviation, min-max uses the observed range. Scaling is
//! restricted to the named column subset; other columns pass through
//! untouched. A zero scale (constant column) falls back to 1.0 so constant
//! features map to zero instead of dividing by zero.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::pipeline::assemble::FeatureMatrix;

/// Which linear scaling function a model kind applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalerKind {
    /// Standardization: (x - mean) / std
    ZScore,
    /// Normalization: (x - min) / (max - min)
    MinMax,
}

/// A fitted scaler: learned per-column offsets and scales.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedScaler {
    kind: ScalerKind,
    columns: Vec<String>,
    offsets: Vec<f64>,
    scales: Vec<f64>,
}

impl FittedScaler {
    /// Learn scaling parameters for the named columns from training data.
    pub fn fit(kind: ScalerKind, matrix: &FeatureMatrix, columns: &[String]) -> Result<Self> {
        if matrix.rows() == 0 {
            return Err(ModelError::Data(
                "cannot fit a scaler on an empty dataset".to_string(),
            ));
        }

        let mut offsets = Vec::with_capacity(columns.len());
        let mut scales = Vec::with_capacity(columns.len());

        for name in columns {
            let idx = column_index(matrix, name)?;
            let column = matrix.values.column(idx);

            let (offset, scale) = match kind {
                ScalerKind::ZScore => {
                    let mean = column.mean().unwrap_or(0.0);
                    let variance =
                        column.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / column.len() as f64;
                    (mean, variance.sqrt())
                }
                ScalerKind::MinMax => {
                    let min = column.iter().copied().fold(f64::INFINITY, f64::min);
                    let max = column.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                    (min, max - min)
                }
            };

            offsets.push(offset);
            scales.push(if scale == 0.0 { 1.0 } else { scale });
        }

        Ok(Self {
            kind,
            columns: columns.to_vec(),
            offsets,
            scales,
        })
    }

    /// Apply the learned parameters to a feature matrix.
    ///
    /// Columns are matched by name, so the input may order its columns
    /// differently than the training data did. A missing column is a schema
    /// mismatch and fails with a data error.
    pub fn transform(&self, matrix: &FeatureMatrix) -> Result<FeatureMatrix> {
        let mut values: Array2<f64> = matrix.values.clone();

        for (i, name) in self.columns.iter().enumerate() {
            let idx = column_index(matrix, name)?;
            let mut column = values.column_mut(idx);
            column.mapv_inplace(|v| (v - self.offsets[i]) / self.scales[i]);
        }

        Ok(FeatureMatrix {
            columns: matrix.columns.clone(),
            values,
        })
    }

    pub fn kind(&self) -> ScalerKind {
        self.kind
    }
}

fn column_index(matrix: &FeatureMatrix, name: &str) -> Result<usize> {
    matrix
        .columns
        .iter()
        .position(|c| c == name)
        .ok_or_else(|| {
            ModelError::Data(format!(
                "scaled column '{}' not found in input; available columns: {:?}",
                name, matrix.columns
            ))
        })
}

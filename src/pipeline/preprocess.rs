//! Feature preprocessing applied identically to every dataset split.
//!
//! The transform is deliberately idempotent: running it on already
//! preprocessed data is a no-op, which is what lets predict-time inputs go
//! through the exact same routine as training data.

use polars::prelude::*;

use crate::error::{ModelError, Result};
use crate::pipeline::label::LABEL_COLUMN;

/// Numeric feature columns used by every model kind.
pub const FEATURE_COLUMNS: [&str; 6] = [
    "Term",
    "NoEmp",
    "SecuredSBA",
    "GrDisburs",
    "GrApprov",
    "ApprovSBA",
];

/// Preprocess a dataset split: keep the feature columns (and the label when
/// present), cast features to Float64, and drop rows with missing feature
/// values.
pub fn preprocess(df: &DataFrame) -> Result<DataFrame> {
    let column_names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let missing: Vec<&str> = FEATURE_COLUMNS
        .iter()
        .filter(|name| !column_names.contains(&name.to_string()))
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(ModelError::Data(format!(
            "dataset is missing expected feature column(s): {}",
            missing.join(", ")
        )));
    }

    let mut selected: Vec<String> = FEATURE_COLUMNS.iter().map(|s| s.to_string()).collect();
    if column_names.contains(&LABEL_COLUMN.to_string()) {
        selected.push(LABEL_COLUMN.to_string());
    }

    let mut out = df.select(selected)?;
    for name in FEATURE_COLUMNS {
        let casted = out.column(name)?.cast(&DataType::Float64).map_err(|e| {
            ModelError::Data(format!("feature column '{}' is not numeric: {}", name, e))
        })?;
        out.with_column(casted)?;
    }

    // Keep only rows where every feature is present
    let mut keep = BooleanChunked::full("keep".into(), true, out.height());
    for name in FEATURE_COLUMNS {
        keep = &keep & &out.column(name)?.as_materialized_series().is_not_null();
    }
    let out = out.filter(&keep)?;

    Ok(out)
}

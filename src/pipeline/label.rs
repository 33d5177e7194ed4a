//! Loan outcome normalization.
//!
//! Maps the raw `MIS_Status` column to the binary `Default` label:
//! "CHGOFF" becomes 1 (charged off), "P I F" becomes 0 (paid in full), and
//! every other value - including missing - drops the whole row. This is a
//! literal two-value mapping: unrecognized categories are not an error, they
//! are excluded and counted so callers can surface the loss.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Raw outcome column as it appears in the source CSVs.
pub const RAW_STATUS_COLUMN: &str = "MIS_Status";

/// Binary label column used for training and evaluation.
pub const LABEL_COLUMN: &str = "Default";

/// Mapping from raw outcome values to the binary 0/1 label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelMapping {
    /// Value that maps to 1 (default event)
    pub event_value: String,
    /// Value that maps to 0 (non-event)
    pub non_event_value: String,
}

impl LabelMapping {
    pub fn new(event_value: String, non_event_value: String) -> Self {
        Self {
            event_value,
            non_event_value,
        }
    }
}

impl Default for LabelMapping {
    fn default() -> Self {
        Self::new("CHGOFF".to_string(), "P I F".to_string())
    }
}

/// Normalize the outcome column of a dataset into the binary label.
///
/// Rows whose outcome matches neither mapping value are removed entirely
/// (features and label). Returns the normalized frame, with `MIS_Status`
/// replaced by an integer `Default` column, and the number of dropped rows.
///
/// A frame that already carries a binary `Default` column (and no raw
/// outcome column) passes through unchanged.
pub fn normalize_labels(df: &DataFrame, mapping: &LabelMapping) -> Result<(DataFrame, usize)> {
    let column_names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    if !column_names.contains(&RAW_STATUS_COLUMN.to_string()) {
        if column_names.contains(&LABEL_COLUMN.to_string()) {
            validate_binary_label(df)?;
            return Ok((df.clone(), 0));
        }
        return Err(ModelError::Data(format!(
            "dataset has neither a '{}' nor a '{}' column",
            RAW_STATUS_COLUMN, LABEL_COLUMN
        )));
    }

    let raw = df.column(RAW_STATUS_COLUMN)?;
    let values = column_to_string_vec(raw)?;

    let mask: Vec<Option<u32>> = values
        .iter()
        .map(|v| match v {
            Some(s) if s == &mapping.event_value => Some(1),
            Some(s) if s == &mapping.non_event_value => Some(0),
            _ => None,
        })
        .collect();

    let keep: BooleanChunked = mask.iter().map(|m| m.is_some()).collect();
    let labels: Vec<u32> = mask.into_iter().flatten().collect();
    let dropped = df.height() - labels.len();

    let mut out = df.filter(&keep)?;
    out = out.drop(RAW_STATUS_COLUMN)?;
    out.with_column(Column::new(LABEL_COLUMN.into(), labels))?;

    Ok((out, dropped))
}

/// Extract the binary labels from a normalized frame.
pub fn extract_labels(df: &DataFrame) -> Result<Vec<usize>> {
    let col = df
        .column(LABEL_COLUMN)
        .map_err(|_| ModelError::Data(format!("label column '{}' not found", LABEL_COLUMN)))?;
    let casted = col.cast(&DataType::UInt32)?;
    let chunked = casted.as_materialized_series().u32()?.clone();

    let mut labels = Vec::with_capacity(df.height());
    for value in chunked.into_iter() {
        match value {
            Some(v) if v <= 1 => labels.push(v as usize),
            Some(v) => {
                return Err(ModelError::Data(format!(
                    "label column '{}' contains out-of-domain value {}",
                    LABEL_COLUMN, v
                )))
            }
            None => {
                return Err(ModelError::Data(format!(
                    "label column '{}' contains missing values after normalization",
                    LABEL_COLUMN
                )))
            }
        }
    }
    Ok(labels)
}

fn validate_binary_label(df: &DataFrame) -> Result<()> {
    // extract_labels already rejects nulls and values outside {0, 1}
    extract_labels(df).map(|_| ())
}

/// Convert a column to `Vec<Option<String>>` for mapping comparison.
fn column_to_string_vec(col: &Column) -> Result<Vec<Option<String>>> {
    let values: Vec<Option<String>> = match col.dtype() {
        DataType::String => col
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect(),
        _ => {
            let cast = col.cast(&DataType::String)?;
            cast.as_materialized_series()
                .str()?
                .into_iter()
                .map(|v| v.map(|s| s.to_string()))
                .collect()
        }
    };

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loan_frame() -> DataFrame {
        df! {
            "Term" => [60.0f64, 84.0, 120.0, 36.0, 60.0],
            "MIS_Status" => [Some("CHGOFF"), Some("P I F"), Some("EXEMPT"), None, Some("P I F")],
        }
        .unwrap()
    }

    #[test]
    fn test_event_maps_to_one_non_event_to_zero() {
        let (out, _) = normalize_labels(&loan_frame(), &LabelMapping::default()).unwrap();
        let labels = extract_labels(&out).unwrap();
        assert_eq!(labels, vec![1, 0, 0]);
    }

    #[test]
    fn test_unmatched_rows_are_dropped_and_counted() {
        let (out, dropped) = normalize_labels(&loan_frame(), &LabelMapping::default()).unwrap();
        assert_eq!(out.height(), 3);
        assert_eq!(dropped, 2); // "EXEMPT" and the missing value
    }

    #[test]
    fn test_status_column_renamed_to_default() {
        let (out, _) = normalize_labels(&loan_frame(), &LabelMapping::default()).unwrap();
        let names: Vec<String> = out.get_column_names().iter().map(|s| s.to_string()).collect();
        assert!(names.contains(&LABEL_COLUMN.to_string()));
        assert!(!names.contains(&RAW_STATUS_COLUMN.to_string()));
    }

    #[test]
    fn test_all_unmatched_yields_empty_frame_not_error() {
        let df = df! {
            "Term" => [12.0f64, 24.0],
            "MIS_Status" => ["EXEMPT", "UNKNOWN"],
        }
        .unwrap();

        let (out, dropped) = normalize_labels(&df, &LabelMapping::default()).unwrap();
        assert_eq!(out.height(), 0);
        assert_eq!(dropped, 2);
    }

    #[test]
    fn test_already_binary_label_passes_through() {
        let df = df! {
            "Term" => [12.0f64, 24.0, 36.0],
            "Default" => [1u32, 0, 1],
        }
        .unwrap();

        let (out, dropped) = normalize_labels(&df, &LabelMapping::default()).unwrap();
        assert_eq!(dropped, 0);
        assert_eq!(extract_labels(&out).unwrap(), vec![1, 0, 1]);
    }

    #[test]
    fn test_out_of_domain_binary_label_is_data_error() {
        let df = df! {
            "Term" => [12.0f64, 24.0],
            "Default" => [0u32, 3],
        }
        .unwrap();

        let result = normalize_labels(&df, &LabelMapping::default());
        assert!(matches!(result, Err(ModelError::Data(_))));
    }

    #[test]
    fn test_missing_outcome_column_is_data_error() {
        let df = df! {
            "Term" => [12.0f64, 24.0],
        }
        .unwrap();

        let result = normalize_labels(&df, &LabelMapping::default());
        assert!(matches!(result, Err(ModelError::Data(_))));
    }
}

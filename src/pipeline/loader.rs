//! Dataset loader for CSV and Parquet files

use std::path::Path;

use polars::prelude::*;

use crate::error::{ModelError, Result};

/// Load a dataset split from a file (CSV or Parquet based on extension).
pub fn load_split(path: &Path) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path).finish().map_err(|e| {
            ModelError::Data(format!(
                "failed to load CSV file '{}': {}",
                path.display(),
                e
            ))
        })?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default()).map_err(|e| {
            ModelError::Data(format!(
                "failed to load Parquet file '{}': {}",
                path.display(),
                e
            ))
        })?,
        _ => {
            return Err(ModelError::Data(format!(
                "unsupported file format '{}' for '{}'. Supported formats: csv, parquet",
                extension,
                path.display()
            )))
        }
    };

    lf.collect().map_err(|e| {
        ModelError::Data(format!(
            "failed to read dataset '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Write a dataset to a CSV file.
pub fn save_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path).map_err(|e| {
        ModelError::Data(format!(
            "failed to create output file '{}': {}",
            path.display(),
            e
        ))
    })?;
    CsvWriter::new(&mut file).finish(df).map_err(|e| {
        ModelError::Data(format!(
            "failed to write CSV file '{}': {}",
            path.display(),
            e
        ))
    })?;
    Ok(())
}

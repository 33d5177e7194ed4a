//! Shared test utilities and fixture generators

use std::path::{Path, PathBuf};

use polars::prelude::*;
use tempfile::TempDir;

use lendcast::config::Config;

/// Build a raw loan frame with the six feature columns and `MIS_Status`.
///
/// Charged-off rows get low feature values, paid-in-full rows get high
/// values, so the classes are linearly separable and every model kind can
/// fit them. `unknown` rows carry an unmapped outcome and must be dropped
/// by label normalization. Feature values are offset by row index so rows
/// are distinct unless a test makes them collide on purpose.
pub fn loan_frame(chgoff: usize, pif: usize, unknown: usize) -> DataFrame {
    loan_frame_salted(chgoff, pif, unknown, 0.0)
}

/// Like [`loan_frame`], with a fractional salt added to every feature so
/// frames built with different salts share no rows.
pub fn loan_frame_salted(chgoff: usize, pif: usize, unknown: usize, salt: f64) -> DataFrame {
    let total = chgoff + pif + unknown;
    let mut term = Vec::with_capacity(total);
    let mut no_emp = Vec::with_capacity(total);
    let mut secured = Vec::with_capacity(total);
    let mut disburs = Vec::with_capacity(total);
    let mut approv = Vec::with_capacity(total);
    let mut approv_sba = Vec::with_capacity(total);
    let mut status = Vec::with_capacity(total);

    let mut push_row = |base: f64, i: usize, outcome: &str| {
        let offset = i as f64 + salt;
        term.push(base + offset);
        no_emp.push(base / 10.0 + offset);
        secured.push(base * 100.0 + offset);
        disburs.push(base * 110.0 + offset);
        approv.push(base * 105.0 + offset);
        approv_sba.push(base * 90.0 + offset);
        status.push(outcome.to_string());
    };

    for i in 0..chgoff {
        push_row(10.0, i, "CHGOFF");
    }
    for i in 0..pif {
        push_row(500.0, i, "P I F");
    }
    for i in 0..unknown {
        push_row(250.0, i, "EXEMPT");
    }

    df! {
        "Term" => term,
        "NoEmp" => no_emp,
        "SecuredSBA" => secured,
        "GrDisburs" => disburs,
        "GrApprov" => approv,
        "ApprovSBA" => approv_sba,
        "MIS_Status" => status,
    }
    .unwrap()
}

/// Write a DataFrame to a CSV file inside `dir`.
pub fn write_csv(df: &mut DataFrame, dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();
    path
}

/// Create a temp workspace with the three split CSVs and a config.yaml.
///
/// Returns the temp dir (keep it alive), the loaded config, and the path of
/// the config file for CLI invocations.
pub fn workspace(
    mut train: DataFrame,
    mut val: DataFrame,
    mut test: DataFrame,
) -> (TempDir, Config, PathBuf) {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("data")).unwrap();

    write_csv(&mut train, &dir.path().join("data"), "train.csv");
    write_csv(&mut val, &dir.path().join("data"), "val.csv");
    write_csv(&mut test, &dir.path().join("data"), "test.csv");

    let config_path = dir.path().join("config.yaml");
    std::fs::write(
        &config_path,
        r#"
data:
  data_train: data/train.csv
  data_val: data/val.csv
  data_test: data/test.csv
models:
  logreg_model: models/logreg.bin
  knn_model: models/knn.bin
  dectree_model: models/dectree.bin
"#,
    )
    .unwrap();

    let config = Config::load(&config_path).unwrap();
    (dir, config, config_path)
}

/// A default workspace with disjoint train/val/test splits.
pub fn default_workspace() -> (TempDir, Config, PathBuf) {
    workspace(
        loan_frame_salted(10, 10, 2, 0.0),
        loan_frame_salted(6, 6, 1, 0.25),
        loan_frame_salted(8, 8, 3, 0.5),
    )
}

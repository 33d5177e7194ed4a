//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::model::ModelKind;

/// Lendcast - train, persist, and evaluate loan default classifiers
#[derive(Parser, Debug)]
#[command(name = "lendcast")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file with dataset and artifact paths
    #[arg(short, long, default_value = "config.yaml", global = true)]
    pub config: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train a model kind on its configured splits
    Train {
        /// Which classifier to train
        #[arg(short, long, value_enum)]
        model: ModelKind,

        /// Persist the fitted pipeline to its configured artifact path
        #[arg(long, default_value = "false")]
        save: bool,
    },

    /// Score a persisted model against the test split
    Evaluate {
        /// Which classifier to evaluate
        #[arg(short, long, value_enum)]
        model: ModelKind,

        /// Random subsample size drawn from the test split (0 = full split)
        #[arg(short, long, default_value = "0")]
        sample: usize,

        /// Seed for the subsample draw; omit for a non-reproducible draw
        #[arg(long)]
        seed: Option<u64>,

        /// Write the four metrics to this path as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Predict labels for a new input file using a persisted model
    Predict {
        /// Which classifier to use
        #[arg(short, long, value_enum)]
        model: ModelKind,

        /// Input file (CSV or Parquet) with the feature columns
        #[arg(short, long)]
        input: PathBuf,

        /// Write predictions as a one-column CSV to this path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip preprocessing - the input is already preprocessed
        #[arg(long, default_value = "false")]
        no_preprocess: bool,
    },
}

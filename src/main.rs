//! Lendcast: loan default classifier CLI
//!
//! Trains, persists, and evaluates the three configured classifier kinds
//! from the command line.

mod cli;
mod config;
mod error;
mod eval;
mod model;
mod pipeline;
mod report;
mod utils;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use polars::prelude::*;

use cli::{Cli, Commands};
use config::Config;
use error::ModelError;
use model::ModelKind;
use pipeline::{load_split, sample_test, save_csv, AssemblyPolicy};
use report::EvaluationReport;
use utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config,
    print_count, print_info, print_step_header, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Train { model, save } => run_train(&config, &cli.config, model, save),
        Commands::Evaluate {
            model,
            sample,
            seed,
            json,
        } => run_evaluate(&config, &cli.config, model, sample, seed, json),
        Commands::Predict {
            model,
            input,
            output,
            no_preprocess,
        } => run_predict(&config, &cli.config, model, &input, output, no_preprocess),
    }
}

fn run_train(config: &Config, config_path: &std::path::Path, kind: ModelKind, save: bool) -> Result<()> {
    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(kind.label(), config_path, config.model_path(kind));

    print_step_header(1, "Assemble Training Data");
    let step_start = Instant::now();
    let spinner = create_spinner("Loading and normalizing splits...");
    let policy = kind.assembly_policy();
    let assembled = pipeline::assemble_training(config, policy)?;
    finish_with_success(&spinner, "Training data assembled");

    match policy {
        AssemblyPolicy::TrainOnly => print_info("Policy: train split only"),
        AssemblyPolicy::TrainPlusValidation => print_info("Policy: train + validation union"),
    }
    print_count("training row(s)", assembled.rows());
    if assembled.dropped_unlabeled > 0 {
        print_count("row(s) excluded with unrecognized outcome", assembled.dropped_unlabeled);
    }
    if assembled.dropped_duplicates > 0 {
        print_count("duplicate row(s) removed", assembled.dropped_duplicates);
    }

    print_step_header(2, "Fit Pipeline");
    let spinner = create_spinner(&format!("Fitting {}...", kind.label()));
    let fitted = model::ModelPipeline::fit(kind, &assembled.features, &assembled.labels)?;
    finish_with_success(&spinner, "Pipeline fitted");
    if fitted.has_transform() {
        print_info("Feature transform fitted alongside the estimator");
    }

    if save {
        print_step_header(3, "Persist Artifact");
        let artifact = config.model_path(kind);
        fitted.save(artifact)?;
        print_success(&format!("Saved to {}", artifact.display()));
    } else {
        print_info("Artifact not saved (pass --save to persist)");
    }

    print_info(&format!("Completed in {:.2?}", step_start.elapsed()));
    print_completion("Training complete!");
    Ok(())
}

fn run_evaluate(
    config: &Config,
    config_path: &std::path::Path,
    kind: ModelKind,
    sample: usize,
    seed: Option<u64>,
    json: Option<PathBuf>,
) -> Result<()> {
    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(kind.label(), config_path, config.model_path(kind));

    print_step_header(1, "Sample Test Data");
    let spinner = create_spinner("Loading test split...");
    let assembled = sample_test(config, sample, seed)?;
    finish_with_success(&spinner, "Test data ready");
    print_count("row(s) to score", assembled.rows());

    print_step_header(2, "Load Model & Predict");
    let spinner = create_spinner("Loading persisted pipeline...");
    let predicted = model::predict_features(config, kind, &assembled.features)?;
    finish_with_success(&spinner, "Predictions computed");

    print_step_header(3, "Score");
    let metrics = eval::score(&predicted, &assembled.labels)?;

    let report = EvaluationReport {
        kind,
        metrics,
        sample_size: assembled.rows(),
        dropped_unlabeled: assembled.dropped_unlabeled,
        dropped_duplicates: assembled.dropped_duplicates,
    };
    report.display();

    if let Some(path) = json {
        report.export_json(&path)?;
        print_success(&format!("Metrics written to {}", path.display()));
    }

    print_completion("Evaluation complete!");
    Ok(())
}

fn run_predict(
    config: &Config,
    config_path: &std::path::Path,
    kind: ModelKind,
    input: &std::path::Path,
    output: Option<PathBuf>,
    no_preprocess: bool,
) -> Result<()> {
    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(kind.label(), config_path, config.model_path(kind));

    print_step_header(1, "Load Input");
    let df = load_split(input)?;
    print_count("input row(s)", df.height());

    print_step_header(2, "Predict");
    let spinner = create_spinner("Loading persisted pipeline...");
    let predicted = model::predict(config, kind, &df, !no_preprocess)?;
    finish_with_success(&spinner, "Predictions computed");

    let defaults = predicted.iter().filter(|&&l| l == 1).count();
    print_count("predicted default(s)", defaults);
    print_count("predicted non-default(s)", predicted.len() - defaults);

    if let Some(path) = output {
        let labels: Vec<u32> = predicted.iter().map(|&l| l as u32).collect();
        let mut out = DataFrame::new(vec![Column::new(
            pipeline::LABEL_COLUMN.into(),
            labels,
        )])
        .map_err(ModelError::from)?;
        save_csv(&mut out, &path)?;
        print_success(&format!("Predictions written to {}", path.display()));
    }

    print_completion("Prediction complete!");
    Ok(())
}

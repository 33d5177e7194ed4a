//! Evaluation report rendering and export

use std::path::Path;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Table};
use console::style;

use crate::error::{ModelError, Result};
use crate::eval::Metrics;
use crate::model::ModelKind;

/// Console summary of one evaluation run.
#[derive(Debug)]
pub struct EvaluationReport {
    pub kind: ModelKind,
    pub metrics: Metrics,
    /// Rows scored
    pub sample_size: usize,
    /// Rows excluded during label normalization
    pub dropped_unlabeled: usize,
    /// Exact-duplicate rows removed
    pub dropped_duplicates: usize,
}

impl EvaluationReport {
    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("EVALUATION SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("Model"), Cell::new(self.kind.label())]);
        table.add_row(vec![Cell::new("Rows scored"), Cell::new(self.sample_size)]);
        table.add_row(vec![
            Cell::new("Accuracy"),
            Cell::new(format!("{:.4}", self.metrics.accuracy)),
        ]);
        table.add_row(vec![
            Cell::new("Precision (macro)"),
            Cell::new(format!("{:.4}", self.metrics.macro_precision)),
        ]);
        table.add_row(vec![
            Cell::new("Recall (macro)"),
            Cell::new(format!("{:.4}", self.metrics.macro_recall)),
        ]);
        table.add_row(vec![
            Cell::new("F1-score (macro)"),
            Cell::new(format!("{:.4}", self.metrics.macro_f1)),
        ]);

        for line in table.lines() {
            println!("    {}", line);
        }

        if self.dropped_unlabeled > 0 || self.dropped_duplicates > 0 {
            println!();
            println!(
                "      {} {} unlabeled row(s) excluded, {} duplicate row(s) removed",
                style("ℹ").cyan(),
                style(self.dropped_unlabeled).yellow(),
                style(self.dropped_duplicates).yellow()
            );
        }
        println!();
    }

    /// Export the four metrics as JSON.
    pub fn export_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.metrics)
            .map_err(|e| ModelError::Data(format!("failed to serialize metrics: {}", e)))?;
        std::fs::write(path, json).map_err(|e| {
            ModelError::Data(format!(
                "failed to write metrics file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(())
    }
}

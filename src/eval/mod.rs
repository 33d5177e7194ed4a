//! Evaluation harness: accuracy and macro-averaged precision/recall/F1.
//!
//! Macro averaging weighs both classes equally regardless of how imbalanced
//! the default rate is. Scoring is pure: inputs are never mutated and the
//! result is returned as structured data for the caller to present.

use serde::Serialize;

use crate::error::{ModelError, Result};

/// The four evaluation scalars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub accuracy: f64,
    pub macro_precision: f64,
    pub macro_recall: f64,
    pub macro_f1: f64,
}

/// Score predictions against ground truth over the {0, 1} label domain.
pub fn score(predicted: &[usize], truth: &[usize]) -> Result<Metrics> {
    if predicted.len() != truth.len() {
        return Err(ModelError::Data(format!(
            "predictions ({}) and ground truth ({}) have different lengths",
            predicted.len(),
            truth.len()
        )));
    }
    if predicted.is_empty() {
        return Err(ModelError::Data(
            "cannot score an empty prediction set".to_string(),
        ));
    }
    if predicted.iter().chain(truth.iter()).any(|&l| l > 1) {
        return Err(ModelError::Data(
            "labels outside the {0, 1} domain".to_string(),
        ));
    }

    let mut correct = 0usize;
    // Per class: [true positives, false positives, false negatives]
    let mut counts = [[0usize; 3]; 2];

    for (&p, &t) in predicted.iter().zip(truth.iter()) {
        if p == t {
            correct += 1;
            counts[p][0] += 1;
        } else {
            counts[p][1] += 1;
            counts[t][2] += 1;
        }
    }

    let mut precision_sum = 0.0;
    let mut recall_sum = 0.0;
    let mut f1_sum = 0.0;
    for [tp, fp, fn_] in counts {
        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };
        precision_sum += precision;
        recall_sum += recall;
        f1_sum += f1;
    }

    Ok(Metrics {
        accuracy: correct as f64 / predicted.len() as f64,
        macro_precision: precision_sum / 2.0,
        macro_recall: recall_sum / 2.0,
        macro_f1: f1_sum / 2.0,
    })
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

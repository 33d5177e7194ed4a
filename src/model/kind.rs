//! Per-kind configuration records.
//!
//! The three model kinds share one pipeline implementation and differ only
//! in the values returned here: which transform (if any) runs before the
//! estimator, and which dataset splits form the training set.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::model::scaler::ScalerKind;
use crate::pipeline::assemble::AssemblyPolicy;
use crate::pipeline::preprocess::FEATURE_COLUMNS;

/// The three supported classifier kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum ModelKind {
    /// Logistic regression with z-score standardized features
    #[value(name = "logreg")]
    Logistic,
    /// K-nearest-neighbors with min-max normalized features
    #[value(name = "knn")]
    Knn,
    /// Decision tree on raw features
    #[value(name = "dectree")]
    DecisionTree,
}

impl ModelKind {
    /// Which scaling function this kind applies, if any.
    pub fn scaler(&self) -> Option<ScalerKind> {
        match self {
            ModelKind::Logistic => Some(ScalerKind::ZScore),
            ModelKind::Knn => Some(ScalerKind::MinMax),
            ModelKind::DecisionTree => None,
        }
    }

    /// Columns the transform is restricted to.
    pub fn scaled_columns(&self) -> Vec<String> {
        FEATURE_COLUMNS.iter().map(|s| s.to_string()).collect()
    }

    /// Which dataset splits form this kind's training set.
    pub fn assembly_policy(&self) -> AssemblyPolicy {
        match self {
            ModelKind::Logistic => AssemblyPolicy::TrainOnly,
            ModelKind::Knn | ModelKind::DecisionTree => AssemblyPolicy::TrainPlusValidation,
        }
    }

    /// Human-readable name for console output.
    pub fn label(&self) -> &'static str {
        match self {
            ModelKind::Logistic => "Logistic Regression",
            ModelKind::Knn => "K-Nearest Neighbors",
            ModelKind::DecisionTree => "Decision Tree",
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

//! The three estimators behind the pipeline contract.
//!
//! Logistic regression and the decision tree come from the linfa ecosystem.
//! K-nearest-neighbors stores its training set and takes a majority vote
//! over Euclidean distance at predict time; the stored matrix is the fitted
//! state, which keeps the whole estimator serializable alongside the
//! others.

use linfa::prelude::*;
use linfa::Dataset;
use linfa_logistic::{FittedLogisticRegression, LogisticRegression};
use linfa_trees::DecisionTree;
use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::model::kind::ModelKind;

/// Default neighborhood size for KNN.
pub const DEFAULT_KNN_NEIGHBORS: usize = 5;

/// A fitted decision-function learner for one model kind.
#[derive(Serialize, Deserialize)]
pub enum FittedEstimator {
    Logistic(FittedLogisticRegression<f64, usize>),
    Knn(KnnClassifier),
    Tree(DecisionTree<f64, usize>),
}

impl FittedEstimator {
    /// Fit a fresh estimator of the given kind on training data.
    pub fn fit(kind: ModelKind, x: &Array2<f64>, y: &[usize]) -> Result<Self> {
        if x.nrows() == 0 || y.is_empty() {
            return Err(ModelError::Data(
                "cannot fit an estimator on an empty training set".to_string(),
            ));
        }
        if x.nrows() != y.len() {
            return Err(ModelError::Data(format!(
                "feature rows ({}) and labels ({}) are misaligned",
                x.nrows(),
                y.len()
            )));
        }

        match kind {
            ModelKind::Logistic => {
                let dataset = Dataset::new(x.clone(), Array1::from(y.to_vec()));
                let model = LogisticRegression::default().fit(&dataset).map_err(|e| {
                    ModelError::Data(format!("logistic regression training failed: {}", e))
                })?;
                Ok(FittedEstimator::Logistic(model))
            }
            ModelKind::Knn => {
                let model = KnnClassifier::fit(x, y, DEFAULT_KNN_NEIGHBORS)?;
                Ok(FittedEstimator::Knn(model))
            }
            ModelKind::DecisionTree => {
                let dataset = Dataset::new(x.clone(), Array1::from(y.to_vec()));
                let model = DecisionTree::params().fit(&dataset).map_err(|e| {
                    ModelError::Data(format!("decision tree training failed: {}", e))
                })?;
                Ok(FittedEstimator::Tree(model))
            }
        }
    }

    /// Predict binary labels for a feature batch, one label per input row.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Vec<usize>> {
        let labels = match self {
            FittedEstimator::Logistic(model) => model.predict(x).to_vec(),
            FittedEstimator::Knn(model) => model.predict(x),
            FittedEstimator::Tree(model) => model.predict(x).to_vec(),
        };
        Ok(labels)
    }

    /// The model kind this estimator was fit for.
    pub fn kind(&self) -> ModelKind {
        match self {
            FittedEstimator::Logistic(_) => ModelKind::Logistic,
            FittedEstimator::Knn(_) => ModelKind::Knn,
            FittedEstimator::Tree(_) => ModelKind::DecisionTree,
        }
    }
}

/// K-nearest-neighbors classifier over Euclidean distance.
///
/// The fitted state is the training set itself. Votes are unweighted; a tie
/// goes to the smaller label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnnClassifier {
    k: usize,
    records: Array2<f64>,
    labels: Vec<usize>,
}

impl KnnClassifier {
    pub fn fit(x: &Array2<f64>, y: &[usize], k: usize) -> Result<Self> {
        if k == 0 {
            return Err(ModelError::Data("k must be at least 1".to_string()));
        }
        if k > x.nrows() {
            return Err(ModelError::Data(format!(
                "k ({}) exceeds the number of training rows ({})",
                k,
                x.nrows()
            )));
        }
        Ok(Self {
            k,
            records: x.clone(),
            labels: y.to_vec(),
        })
    }

    pub fn predict(&self, x: &Array2<f64>) -> Vec<usize> {
        x.rows().into_iter().map(|row| self.predict_row(row)).collect()
    }

    fn predict_row(&self, row: ArrayView1<f64>) -> usize {
        let mut distances: Vec<(f64, usize)> = self
            .records
            .rows()
            .into_iter()
            .zip(self.labels.iter())
            .map(|(train_row, &label)| {
                let dist: f64 = train_row
                    .iter()
                    .zip(row.iter())
                    .map(|(a, b)| (a - b).powi(2))
                    .sum();
                (dist, label)
            })
            .collect();

        distances.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let mut votes = [0usize; 2];
        for (_, label) in distances.iter().take(self.k) {
            votes[(*label).min(1)] += 1;
        }
        // Tie goes to label 0
        usize::from(votes[1] > votes[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // Two well-separated clusters: lows labeled 0, highs labeled 1
    fn clustered() -> (Array2<f64>, Vec<usize>) {
        let x = array![
            [0.0, 0.1],
            [0.2, 0.0],
            [0.1, 0.2],
            [0.0, 0.3],
            [0.2, 0.2],
            [5.0, 5.1],
            [5.2, 5.0],
            [5.1, 5.2],
            [5.0, 5.3],
            [5.2, 5.2],
        ];
        let y = vec![0, 0, 0, 0, 0, 1, 1, 1, 1, 1];
        (x, y)
    }

    #[test]
    fn test_knn_classifies_separable_clusters() {
        let (x, y) = clustered();
        let model = KnnClassifier::fit(&x, &y, 3).unwrap();
        let preds = model.predict(&array![[0.1, 0.1], [5.1, 5.1]]);
        assert_eq!(preds, vec![0, 1]);
    }

    #[test]
    fn test_knn_k_larger_than_training_set_is_data_error() {
        let (x, y) = clustered();
        let result = KnnClassifier::fit(&x, &y, 11);
        assert!(matches!(result, Err(ModelError::Data(_))));
    }

    #[test]
    fn test_each_kind_fits_and_predicts_separable_data() {
        let (x, y) = clustered();
        for kind in [ModelKind::Logistic, ModelKind::Knn, ModelKind::DecisionTree] {
            let model = FittedEstimator::fit(kind, &x, &y).unwrap();
            assert_eq!(model.kind(), kind);
            let preds = model.predict(&x).unwrap();
            assert_eq!(preds.len(), x.nrows());
            assert_eq!(preds, y, "kind {:?} should separate the clusters", kind);
        }
    }

    #[test]
    fn test_empty_training_set_is_data_error() {
        let x = Array2::zeros((0, 2));
        let result = FittedEstimator::fit(ModelKind::DecisionTree, &x, &[]);
        assert!(matches!(result, Err(ModelError::Data(_))));
    }

    #[test]
    fn test_misaligned_labels_are_data_error() {
        let (x, _) = clustered();
        let result = FittedEstimator::fit(ModelKind::Knn, &x, &[0, 1]);
        assert!(matches!(result, Err(ModelError::Data(_))));
    }
}

//! End-to-end tests for the pipeline contract: train, persist, reload,
//! predict, and the artifact error taxonomy.

use lendcast::error::ModelError;
use lendcast::eval;
use lendcast::model::{self, ModelKind, ModelPipeline};
use lendcast::pipeline::sample_test;

#[path = "common/mod.rs"]
mod common;

use common::*;

const ALL_KINDS: [ModelKind; 3] = [ModelKind::Logistic, ModelKind::Knn, ModelKind::DecisionTree];

#[test]
fn test_train_save_reload_predict_every_kind() {
    let (_dir, config, _) = default_workspace();

    for kind in ALL_KINDS {
        let (fitted, assembled) = model::train(&config, kind, true).unwrap();
        let in_memory = fitted.predict(&assembled.features).unwrap();

        // Reload from the configured path and predict the same rows
        let reloaded = ModelPipeline::load(config.model_path(kind)).unwrap();
        let from_disk = reloaded.predict(&assembled.features).unwrap();
        assert_eq!(
            in_memory, from_disk,
            "persistence altered predictions for {:?}",
            kind
        );
    }
}

#[test]
fn test_trained_models_separate_the_classes() {
    let (_dir, config, _) = default_workspace();

    for kind in ALL_KINDS {
        model::train(&config, kind, true).unwrap();

        let assembled = sample_test(&config, 0, None).unwrap();
        let predicted = model::predict_features(&config, kind, &assembled.features).unwrap();
        let metrics = eval::score(&predicted, &assembled.labels).unwrap();
        assert!(
            metrics.accuracy > 0.9,
            "{:?} should classify well-separated clusters, got accuracy {}",
            kind,
            metrics.accuracy
        );
    }
}

#[test]
fn test_predict_without_saved_artifact_is_not_found() {
    let (_dir, config, _) = default_workspace();

    // Train but do not save
    let (_fitted, assembled) = model::train(&config, ModelKind::Knn, false).unwrap();

    let result = model::predict_features(&config, ModelKind::Knn, &assembled.features);
    assert!(matches!(result, Err(ModelError::ArtifactNotFound { .. })));
}

#[test]
fn test_corrupt_artifact_is_distinguished_from_missing() {
    let (_dir, config, _) = default_workspace();

    let artifact = config.model_path(ModelKind::DecisionTree);
    std::fs::create_dir_all(artifact.parent().unwrap()).unwrap();
    std::fs::write(artifact, b"garbage bytes").unwrap();

    let assembled = sample_test(&config, 0, None).unwrap();
    let result = model::predict_features(&config, ModelKind::DecisionTree, &assembled.features);
    assert!(matches!(result, Err(ModelError::ArtifactCorrupt { .. })));
}

#[test]
fn test_artifacts_are_independent_per_kind() {
    let (_dir, config, _) = default_workspace();

    model::train(&config, ModelKind::Logistic, true).unwrap();

    // Only the logistic artifact exists
    assert!(config.model_path(ModelKind::Logistic).exists());
    assert!(!config.model_path(ModelKind::Knn).exists());

    let assembled = sample_test(&config, 0, None).unwrap();
    let result = model::predict_features(&config, ModelKind::Knn, &assembled.features);
    assert!(matches!(result, Err(ModelError::ArtifactNotFound { .. })));
}

#[test]
fn test_retrain_overwrites_prior_artifact() {
    let (_dir, config, _) = default_workspace();

    model::train(&config, ModelKind::Knn, true).unwrap();
    let first = std::fs::metadata(config.model_path(ModelKind::Knn)).unwrap().len();

    // Second training run replaces the artifact in place
    model::train(&config, ModelKind::Knn, true).unwrap();
    assert!(config.model_path(ModelKind::Knn).exists());
    let second = std::fs::metadata(config.model_path(ModelKind::Knn)).unwrap().len();
    assert_eq!(first, second);

    let reloaded = ModelPipeline::load(config.model_path(ModelKind::Knn)).unwrap();
    assert_eq!(reloaded.kind(), ModelKind::Knn);
}

#[test]
fn test_predict_applies_preprocessing_to_raw_input() {
    let (_dir, config, _) = default_workspace();
    model::train(&config, ModelKind::DecisionTree, true).unwrap();

    // Raw frame still carries MIS_Status and integer-typed features
    let raw = loan_frame_salted(3, 3, 0, 0.5).drop("MIS_Status").unwrap();
    let predicted = model::predict(&config, ModelKind::DecisionTree, &raw, true).unwrap();
    assert_eq!(predicted.len(), 6);
    assert_eq!(&predicted[..3], &[1, 1, 1]);
    assert_eq!(&predicted[3..], &[0, 0, 0]);
}

#[test]
fn test_training_on_empty_split_is_data_error() {
    // Train split whose outcomes all fail to map
    let train = loan_frame(0, 0, 4);
    let (_dir, config, _) = workspace(
        train,
        loan_frame_salted(2, 2, 0, 0.25),
        loan_frame_salted(2, 2, 0, 0.5),
    );

    let result = model::train(&config, ModelKind::Logistic, false);
    assert!(matches!(result, Err(ModelError::Data(_))));
}

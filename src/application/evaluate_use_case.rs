// ============================================================
// Layer 2 — EvaluateUseCase
// ============================================================
// Re-scores a saved checkpoint on the held-out split of a dataset.
//
// With the same dataset, split seed and test fraction used for
// training, the split reproduces exactly the test set the model
// never saw, so the accuracy matches the one reported by `train`.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::application::train_use_case::delimiter_byte;
use crate::data::{loader::CsvSampleLoader, splitter::split_train_test};
use crate::domain::traits::SampleSource;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::{
    evaluator::{evaluate, Evaluation},
    model::{Classifier, ClassifierConfig},
    InferBackend,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateConfig {
    pub dataset_path:    PathBuf,
    pub checkpoint_path: PathBuf,
    pub delimiter:       char,
    pub split_seed:      u64,
    pub test_fraction:   f64,
    pub hidden1:         usize,
    pub hidden2:         usize,
}

impl Default for EvaluateConfig {
    fn default() -> Self {
        Self {
            dataset_path:    "iris-data-set.csv".into(),
            checkpoint_path: "iris_model.ckpt".into(),
            delimiter:       ',',
            split_seed:      33,
            test_fraction:   0.2,
            hidden1:         8,
            hidden2:         9,
        }
    }
}

impl EvaluateConfig {
    pub fn model_config(&self) -> ClassifierConfig {
        ClassifierConfig::new()
            .with_hidden1(self.hidden1)
            .with_hidden2(self.hidden2)
    }
}

pub struct EvaluateUseCase {
    config: EvaluateConfig,
}

impl EvaluateUseCase {
    pub fn new(config: EvaluateConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<Evaluation> {
        let cfg = &self.config;

        // Load the model first: a missing or mismatched checkpoint
        // fails without touching the dataset
        let ckpt   = CheckpointManager::new(&cfg.checkpoint_path);
        let header = ckpt.read_header()?;
        tracing::info!(
            "Evaluating checkpoint '{}' (format v{}, widths {:?})",
            cfg.checkpoint_path.display(), header.version, header.widths,
        );

        let device = Default::default();
        let model: Classifier<InferBackend> = ckpt.load_model(&cfg.model_config(), &device)?;

        let loader  = CsvSampleLoader::new(&cfg.dataset_path, delimiter_byte(cfg.delimiter)?);
        let samples = loader.load_all()?;
        let (_, test_set) = split_train_test(samples, cfg.split_seed, cfg.test_fraction)?;

        Ok(evaluate(&model, &test_set)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::train_use_case::{tests::write_dataset, TrainConfig, TrainUseCase};
    use crate::error::ClassifierError;
    use crate::ml::trainer::tests::separable_samples;

    #[test]
    fn test_reproduces_training_evaluation() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = dir.path().join("iris.csv");
        write_dataset(&dataset, &separable_samples(10, 8));

        let train_cfg = TrainConfig {
            dataset_path:    dataset.clone(),
            checkpoint_path: dir.path().join("model.ckpt"),
            epochs:          30,
            ..Default::default()
        };
        let summary = TrainUseCase::new(train_cfg.clone()).execute().unwrap();

        let eval = EvaluateUseCase::new(EvaluateConfig {
            dataset_path:    dataset,
            checkpoint_path: train_cfg.checkpoint_path,
            ..Default::default()
        })
        .execute()
        .unwrap();

        assert_eq!(eval.correct, summary.evaluation.correct);
        assert_eq!(eval.total, summary.evaluation.total);
        assert_eq!(eval.mean_loss, summary.evaluation.mean_loss);
    }

    #[test]
    fn test_missing_checkpoint_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = EvaluateUseCase::new(EvaluateConfig {
            checkpoint_path: dir.path().join("absent.ckpt"),
            ..Default::default()
        })
        .execute()
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ClassifierError>(),
            Some(ClassifierError::Checkpoint { .. })
        ));
    }
}

// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Validate configuration    (fails before any work)
//   Step 2: Load the dataset          (Layer 4 - data)
//   Step 3: Split train/test          (Layer 4 - data)
//   Step 4: Build the model           (Layer 5 - ml)
//   Step 5: Train                     (Layer 5 - ml)
//   Step 6: Evaluate on the test set  (Layer 5 - ml)
//   Step 7: Save checkpoint           (Layer 6 - infra)
//   Step 8: Save loss trace + summary (Layer 6 - infra)
//
// The use case owns every piece of state for one run; nothing
// is shared between runs.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use burn::module::AutodiffModule;
use serde::{Deserialize, Serialize};

use crate::data::{loader::CsvSampleLoader, splitter::split_train_test};
use crate::domain::traits::SampleSource;
use crate::error::ClassifierError;
use crate::infra::{checkpoint::CheckpointManager, metrics::MetricsLogger};
use crate::ml::{
    evaluator::{evaluate, Evaluation},
    model::{Classifier, ClassifierConfig},
    trainer::{train, LossTrace, TrainingOptions},
    TrainBackend,
};

// ─── Training Configuration ──────────────────────────────────────────────────
// All settings for a training run. Serialisable so it can be
// written into the run summary next to the results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub dataset_path:    PathBuf,
    pub checkpoint_path: PathBuf,
    pub metrics_path:    Option<PathBuf>,
    pub summary_path:    Option<PathBuf>,
    pub delimiter:       char,
    pub seed:            u64,
    pub split_seed:      u64,
    pub test_fraction:   f64,
    pub epochs:          usize,
    pub lr:              f64,
    pub hidden1:         usize,
    pub hidden2:         usize,
    pub log_every:       usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            dataset_path:    "iris-data-set.csv".into(),
            checkpoint_path: "iris_model.ckpt".into(),
            metrics_path:    None,
            summary_path:    None,
            delimiter:       ',',
            seed:            41,
            split_seed:      33,
            test_fraction:   0.2,
            epochs:          100,
            lr:              0.01,
            hidden1:         8,
            hidden2:         9,
            log_every:       10,
        }
    }
}

impl TrainConfig {
    pub fn model_config(&self) -> ClassifierConfig {
        ClassifierConfig::new()
            .with_hidden1(self.hidden1)
            .with_hidden2(self.hidden2)
    }

    pub fn training_options(&self) -> TrainingOptions {
        TrainingOptions {
            epochs:        self.epochs,
            learning_rate: self.lr,
            log_every:     self.log_every,
        }
    }

    /// Reject anything that would make the run meaningless,
    /// before any file is read.
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.epochs == 0 {
            return Err(ClassifierError::config("epochs must be positive"));
        }
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(ClassifierError::config(format!(
                "test fraction must be in (0, 1), got {}",
                self.test_fraction
            )));
        }
        delimiter_byte(self.delimiter)?;
        self.training_options().validate()?;
        self.model_config().validate()
    }
}

/// The csv reader needs a single-byte delimiter.
pub fn delimiter_byte(delimiter: char) -> Result<u8, ClassifierError> {
    u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| ClassifierError::config(format!("delimiter must be ASCII, got '{delimiter}'")))
}

/// Outcome of one training run
#[derive(Debug, Clone, Serialize)]
pub struct TrainSummary {
    pub config:        TrainConfig,
    pub train_samples: usize,
    pub test_samples:  usize,
    pub evaluation:    Evaluation,
    pub loss_trace:    LossTrace,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<TrainSummary> {
        let cfg = &self.config;

        // ── Step 1: Validate ─────────────────────────────────────────────────
        cfg.validate()?;

        // ── Step 2: Load dataset ─────────────────────────────────────────────
        let loader  = CsvSampleLoader::new(&cfg.dataset_path, delimiter_byte(cfg.delimiter)?);
        let samples = loader.load_all()?;

        // ── Step 3: Train / test split ───────────────────────────────────────
        let (train_set, test_set) = split_train_test(samples, cfg.split_seed, cfg.test_fraction)?;
        tracing::info!("Split: {} train, {} test", train_set.len(), test_set.len());

        // ── Step 4: Build model ──────────────────────────────────────────────
        let device = Default::default();
        let mut model: Classifier<TrainBackend> = cfg.model_config().init(cfg.seed, &device)?;
        tracing::info!("Model ready: widths {:?}, seed {}", model.widths(), cfg.seed);

        // ── Step 5: Train ────────────────────────────────────────────────────
        let loss_trace = train(&mut model, &train_set, &cfg.training_options())?;

        // ── Step 6: Evaluate without autodiff ────────────────────────────────
        let model      = model.valid();
        let evaluation = evaluate(&model, &test_set)?;

        // ── Step 7: Save checkpoint ──────────────────────────────────────────
        CheckpointManager::new(&cfg.checkpoint_path).save_model(&model)?;

        // ── Step 8: Loss trace and summary ───────────────────────────────────
        if let Some(path) = &cfg.metrics_path {
            MetricsLogger::new(path).write_loss_trace(&loss_trace)?;
        }

        let summary = TrainSummary {
            config:        cfg.clone(),
            train_samples: train_set.len(),
            test_samples:  test_set.len(),
            evaluation,
            loss_trace,
        };

        if let Some(path) = &cfg.summary_path {
            let json = serde_json::to_string_pretty(&summary)?;
            fs::write(path, json)
                .with_context(|| format!("Cannot write summary to '{}'", path.display()))?;
            tracing::debug!("Saved run summary to '{}'", path.display());
        }

        Ok(summary)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::sample::Sample;
    use crate::ml::trainer::tests::separable_samples;
    use std::io::Write;
    use std::path::Path;

    pub(crate) fn write_dataset(path: &Path, samples: &[Sample]) {
        let mut f = fs::File::create(path).unwrap();
        writeln!(f, "sepal.length,sepal.width,petal.length,petal.width,variety").unwrap();
        for s in samples {
            let [a, b, c, d] = s.features;
            writeln!(f, "{a},{b},{c},{d},{}", s.species).unwrap();
        }
    }

    #[test]
    fn test_end_to_end_run_writes_all_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = dir.path().join("iris.csv");
        write_dataset(&dataset, &separable_samples(30, 6));

        let config = TrainConfig {
            dataset_path:    dataset,
            checkpoint_path: dir.path().join("model.ckpt"),
            metrics_path:    Some(dir.path().join("metrics.csv")),
            summary_path:    Some(dir.path().join("summary.json")),
            ..Default::default()
        };
        let summary = TrainUseCase::new(config.clone()).execute().unwrap();

        assert_eq!(summary.train_samples, 72);
        assert_eq!(summary.test_samples, 18);
        assert_eq!(summary.loss_trace.len(), 100);
        assert!(summary.evaluation.accuracy >= 0.9);

        assert!(config.checkpoint_path.exists());
        assert!(dir.path().join("metrics.csv").exists());

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("summary.json")).unwrap())
                .unwrap();
        assert_eq!(json["config"]["epochs"], 100);
        assert_eq!(json["test_samples"], 18);
    }

    #[test]
    fn test_invalid_config_fails_before_reading_files() {
        let base = TrainConfig {
            dataset_path: "/definitely/not/here.csv".into(),
            ..Default::default()
        };
        let bad = [
            TrainConfig { epochs: 0, ..base.clone() },
            TrainConfig { lr: 0.0, ..base.clone() },
            TrainConfig { lr: -1.0, ..base.clone() },
            TrainConfig { test_fraction: 1.0, ..base.clone() },
            TrainConfig { hidden1: 0, ..base.clone() },
            TrainConfig { delimiter: 'é', ..base.clone() },
        ];
        for cfg in bad {
            let err = TrainUseCase::new(cfg).execute().unwrap_err();
            assert!(
                matches!(err.downcast_ref::<ClassifierError>(), Some(ClassifierError::Config(_))),
                "unexpected error: {err}"
            );
        }
    }

    #[test]
    fn test_unknown_label_aborts_run() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = dir.path().join("iris.csv");
        fs::write(&dataset, "a,b,c,d,variety\n1,2,3,4,Setosa\n1,2,3,4,Unknown\n").unwrap();

        let config = TrainConfig {
            dataset_path:    dataset,
            checkpoint_path: dir.path().join("model.ckpt"),
            ..Default::default()
        };
        let err = TrainUseCase::new(config.clone()).execute().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ClassifierError>(),
            Some(ClassifierError::DataFormat { .. })
        ));
        assert!(!config.checkpoint_path.exists());
    }
}

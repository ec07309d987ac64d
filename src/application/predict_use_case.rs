// ============================================================
// Layer 2 — PredictUseCase
// ============================================================
// Loads a checkpoint once and classifies measurement vectors.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::domain::sample::FEATURE_COUNT;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::{
    inferencer::{Inferencer, Prediction},
    model::ClassifierConfig,
};

pub struct PredictUseCase {
    inferencer: Inferencer,
}

impl PredictUseCase {
    pub fn new(checkpoint_path: PathBuf, model_config: &ClassifierConfig) -> Result<Self> {
        let ckpt = CheckpointManager::new(checkpoint_path);
        let inferencer = Inferencer::from_checkpoint(&ckpt, model_config)
            .with_context(|| "Cannot load classifier. Have you run 'train' first?")?;
        Ok(Self { inferencer })
    }

    pub fn predict(&self, features: &[f32]) -> Result<Prediction> {
        let features: [f32; FEATURE_COUNT] = features.try_into().map_err(|_| {
            anyhow::anyhow!("expected {FEATURE_COUNT} features, got {}", features.len())
        })?;
        Ok(self.inferencer.predict(features)?)
    }
}

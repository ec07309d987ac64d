// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Loads a checkpoint and classifies single 4-vectors.
// This is the whole contract an outer service needs:
// "supply 4 measurements, receive 3 class scores".

use burn::{prelude::*, tensor::activation::softmax};
use serde::{Deserialize, Serialize};

use crate::domain::{sample::FEATURE_COUNT, species::Species};
use crate::error::{ClassifierError, Result};
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::{Classifier, ClassifierConfig};
use crate::ml::trainer::check_sample_shape;
use crate::ml::InferBackend;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Raw unnormalised class scores
    pub scores:        Vec<f32>,
    /// Softmax of `scores`
    pub probabilities: Vec<f32>,
    pub species:       Species,
}

impl Prediction {
    pub fn confidence(&self) -> f32 {
        self.probabilities[self.species.index()]
    }
}

pub struct Inferencer {
    model: Classifier<InferBackend>,
}

impl Inferencer {
    pub fn new(model: Classifier<InferBackend>) -> Result<Self> {
        check_sample_shape(&model)?;
        Ok(Self { model })
    }

    pub fn from_checkpoint(
        ckpt_manager: &CheckpointManager,
        config:       &ClassifierConfig,
    ) -> Result<Self> {
        let device = Default::default();
        let model  = ckpt_manager.load_model::<InferBackend>(config, &device)?;
        Self::new(model)
    }

    pub fn predict(&self, features: [f32; FEATURE_COUNT]) -> Result<Prediction> {
        let scores = self.model.scores(&features)?;

        let probabilities = softmax(
            Tensor::<InferBackend, 1>::from_floats(scores.as_slice(), &self.model.device()),
            0,
        )
        .into_data()
        .convert::<f32>()
        .to_vec::<f32>()
        .map_err(|e| ClassifierError::config(format!("cannot read probabilities: {e:?}")))?;

        // First maximum wins on ties
        let best = scores
            .iter()
            .enumerate()
            .fold(0, |best, (i, s)| if *s > scores[best] { i } else { best });
        let species = Species::from_index(best)
            .ok_or_else(|| ClassifierError::config(format!("class index {best} has no species")))?;

        tracing::debug!("Predicted {} for {:?} (scores {:?})", species, features, scores);
        Ok(Prediction { scores, probabilities, species })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::trainer::{tests::separable_samples, train, TrainingOptions};
    use crate::ml::TrainBackend;
    use burn::module::AutodiffModule;

    #[test]
    fn test_probabilities_sum_to_one_and_match_argmax() {
        let model: Classifier<InferBackend> =
            ClassifierConfig::new().init(41, &Default::default()).unwrap();
        let inferencer = Inferencer::new(model).unwrap();

        let p = inferencer.predict([5.6, 3.7, 2.2, 0.5]).unwrap();
        assert_eq!(p.scores.len(), 3);
        assert!((p.probabilities.iter().sum::<f32>() - 1.0).abs() < 1e-5);

        let max = p.probabilities.iter().cloned().fold(f32::MIN, f32::max);
        assert_eq!(p.confidence(), max);
    }

    #[test]
    fn test_checkpointed_model_classifies_clusters() {
        let mut model: Classifier<TrainBackend> =
            ClassifierConfig::new().init(41, &Default::default()).unwrap();
        train(&mut model, &separable_samples(30, 5), &TrainingOptions::default()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let manager = CheckpointManager::new(dir.path().join("model.ckpt"));
        manager.save_model(&model.valid()).unwrap();

        let inferencer = Inferencer::from_checkpoint(&manager, &ClassifierConfig::new()).unwrap();
        assert_eq!(inferencer.predict([6.0, 1.0, 1.0, 1.0]).unwrap().species, Species::Setosa);
        assert_eq!(inferencer.predict([1.0, 6.0, 1.0, 1.0]).unwrap().species, Species::Versicolor);
        assert_eq!(inferencer.predict([1.0, 1.0, 6.0, 1.0]).unwrap().species, Species::Virginica);
    }

    #[test]
    fn test_non_iris_architecture_rejected() {
        let model: Classifier<InferBackend> = ClassifierConfig::new()
            .with_out_features(2)
            .init(0, &Default::default())
            .unwrap();
        assert!(matches!(Inferencer::new(model), Err(ClassifierError::Config(_))));
    }
}

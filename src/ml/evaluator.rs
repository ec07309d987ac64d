// ============================================================
// Layer 5 — Evaluator
// ============================================================
// Scores a model on held-out samples:
//   - mean cross-entropy loss over the set
//   - accuracy: fraction where argmax(scores) == true label
//
// Takes a model on a plain Backend. Callers holding an autodiff
// model pass model.valid(), so no gradient graph is built here.

use burn::{nn::loss::CrossEntropyLossConfig, prelude::*};
use serde::{Deserialize, Serialize};

use crate::data::batcher::SampleBatcher;
use crate::domain::{sample::Sample, species::Species};
use crate::error::{ClassifierError, Result};
use crate::ml::model::Classifier;
use crate::ml::trainer::check_sample_shape;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Fraction of correctly classified samples, in [0, 1]
    pub accuracy:  f32,
    pub mean_loss: f32,
    pub correct:   usize,
    pub total:     usize,
}

/// Evaluate `model` on `test_set`. An empty set is an error rather
/// than a NaN accuracy.
pub fn evaluate<B: Backend>(model: &Classifier<B>, test_set: &[Sample]) -> Result<Evaluation> {
    check_sample_shape(model)?;
    if test_set.is_empty() {
        return Err(ClassifierError::EmptyDataset("evaluation"));
    }

    let device = model.device();
    let batch  = SampleBatcher::<B>::new(device.clone()).batch(test_set);
    let scores = model.forward(batch.features);

    let ce = CrossEntropyLossConfig::new().init(&device);
    let mean_loss: f32 = ce
        .forward(scores.clone(), batch.labels.clone())
        .into_scalar()
        .elem::<f32>();

    // argmax(1) returns shape [batch, 1], flatten to [batch]
    // before comparing with labels which is [batch]
    let predicted = scores.argmax(1).flatten::<1>(0, 1);
    let correct: i64 = predicted
        .clone()
        .equal(batch.labels)
        .int()
        .sum()
        .into_scalar()
        .elem::<i64>();

    if tracing::enabled!(tracing::Level::DEBUG) {
        log_predictions(test_set, predicted);
    }

    let total   = test_set.len();
    let correct = correct as usize;
    let evaluation = Evaluation {
        accuracy: correct as f32 / total as f32,
        mean_loss,
        correct,
        total,
    };

    tracing::info!(
        "Evaluation: {}/{} correct ({:.1}%), loss={:.6}",
        correct, total, evaluation.accuracy * 100.0, mean_loss,
    );
    Ok(evaluation)
}

fn log_predictions<B: Backend>(test_set: &[Sample], predicted: Tensor<B, 1, Int>) {
    let predicted: Vec<i64> = match predicted.into_data().convert::<i64>().to_vec() {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!("Cannot read predictions: {:?}", e);
            return;
        }
    };

    for (i, (sample, class)) in test_set.iter().zip(predicted).enumerate() {
        let guess = Species::from_index(class as usize)
            .map(Species::name)
            .unwrap_or("?");
        tracing::debug!(
            "{:>3}. {:?} | true={} | predicted={}",
            i + 1, sample.features, sample.species, guess,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::model::ClassifierConfig;
    use crate::ml::trainer::tests::separable_samples;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    fn build() -> Classifier<TestBackend> {
        ClassifierConfig::new().init(41, &Default::default()).unwrap()
    }

    #[test]
    fn test_empty_test_set_is_an_error() {
        let err = evaluate(&build(), &[]).unwrap_err();
        assert!(matches!(err, ClassifierError::EmptyDataset("evaluation")));
    }

    #[test]
    fn test_accuracy_matches_manual_argmax() {
        let model   = build();
        let samples = separable_samples(4, 3);
        let eval    = evaluate(&model, &samples).unwrap();

        let expected = samples
            .iter()
            .filter(|s| {
                let scores = model.scores(&s.features).unwrap();
                let best = scores
                    .iter()
                    .enumerate()
                    .max_by(|a, b| a.1.total_cmp(b.1))
                    .map(|(i, _)| i)
                    .unwrap();
                best == s.label()
            })
            .count();

        assert_eq!(eval.total, 12);
        assert_eq!(eval.correct, expected);
        assert!((0.0..=1.0).contains(&eval.accuracy));
        assert!(eval.mean_loss.is_finite() && eval.mean_loss > 0.0);
    }

    #[test]
    fn test_loss_matches_softmax_negative_log_likelihood() {
        let model   = build();
        let samples = separable_samples(2, 4);
        let eval    = evaluate(&model, &samples).unwrap();

        let manual: f32 = samples
            .iter()
            .map(|s| {
                let scores = model.scores(&s.features).unwrap();
                let max = scores.iter().cloned().fold(f32::MIN, f32::max);
                let log_sum: f32 = scores.iter().map(|v| (v - max).exp()).sum::<f32>().ln() + max;
                log_sum - scores[s.label()]
            })
            .sum::<f32>()
            / samples.len() as f32;

        assert!((eval.mean_loss - manual).abs() < 1e-4, "{} vs {}", eval.mean_loss, manual);
    }
}

// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Full-batch gradient descent with Adam:
//
//   for each epoch:
//     scores = model.forward(all training features)
//     loss   = cross_entropy(scores, labels)     (log-softmax + NLL, mean)
//     record loss
//     backward, Adam step
//
// There is no mini-batching, no shuffling and no early stopping:
// the loop runs exactly `epochs` iterations.
//
// Adam (Kingma & Ba, 2015) with bias correction:
//   m = β1*m + (1-β1)*g
//   v = β2*v + (1-β2)*g²
//   θ = θ - lr * m̂ / (√v̂ + ε)
// with β1 = 0.9, β2 = 0.999, ε = 1e-8.

use burn::{
    nn::loss::CrossEntropyLossConfig,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};
use serde::{Deserialize, Serialize};

use crate::data::batcher::SampleBatcher;
use crate::domain::{
    sample::{Sample, FEATURE_COUNT},
    species::Species,
};
use crate::error::{ClassifierError, Result};
use crate::ml::model::Classifier;

const ADAM_BETA_1:  f32 = 0.9;
const ADAM_BETA_2:  f32 = 0.999;
const ADAM_EPSILON: f32 = 1e-8;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingOptions {
    pub epochs:        usize,
    pub learning_rate: f64,
    /// Log the loss every `log_every` epochs; 0 disables progress logs
    pub log_every:     usize,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self { epochs: 100, learning_rate: 0.01, log_every: 10 }
    }
}

impl TrainingOptions {
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(ClassifierError::config(format!(
                "learning rate must be positive, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }
}

/// Training loss, one value per epoch in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LossTrace {
    losses: Vec<f32>,
}

impl LossTrace {
    pub fn values(&self) -> &[f32] {
        &self.losses
    }

    pub fn len(&self) -> usize {
        self.losses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.losses.is_empty()
    }

    pub fn first(&self) -> Option<f32> {
        self.losses.first().copied()
    }

    pub fn last(&self) -> Option<f32> {
        self.losses.last().copied()
    }
}

/// Models trained or evaluated on iris samples must map 4 features to 3 classes.
pub(crate) fn check_sample_shape<B: Backend>(model: &Classifier<B>) -> Result<()> {
    let [d_in, _, _, d_out] = model.widths();
    if d_in != FEATURE_COUNT || d_out != Species::COUNT {
        return Err(ClassifierError::config(format!(
            "model maps {d_in} → {d_out}, samples need {FEATURE_COUNT} → {}",
            Species::COUNT
        )));
    }
    Ok(())
}

/// Train `model` in place for `options.epochs` full passes over `train_set`.
///
/// `epochs = 0` is a no-op returning an empty trace. The optimizer and its
/// moment estimates live only for the duration of this call.
pub fn train<B: AutodiffBackend>(
    model:     &mut Classifier<B>,
    train_set: &[Sample],
    options:   &TrainingOptions,
) -> Result<LossTrace> {
    options.validate()?;
    check_sample_shape(model)?;

    let mut trace = LossTrace { losses: Vec::with_capacity(options.epochs) };
    if options.epochs == 0 {
        return Ok(trace);
    }
    if train_set.is_empty() {
        return Err(ClassifierError::EmptyDataset("training"));
    }

    let device = model.device();
    let batch  = SampleBatcher::<B>::new(device.clone()).batch(train_set);
    let loss_fn = CrossEntropyLossConfig::new().init(&device);

    let mut optim = AdamConfig::new()
        .with_beta_1(ADAM_BETA_1)
        .with_beta_2(ADAM_BETA_2)
        .with_epsilon(ADAM_EPSILON)
        .init();

    tracing::info!(
        "Training on {} samples for {} epochs (lr={})",
        train_set.len(), options.epochs, options.learning_rate,
    );

    // optim.step consumes the model, so work on an owned copy and
    // write it back once the loop is done
    let mut current = model.clone();
    for epoch in 0..options.epochs {
        let scores = current.forward(batch.features.clone());
        let loss   = loss_fn.forward(scores, batch.labels.clone());

        let loss_val: f32 = loss.clone().into_scalar().elem::<f32>();
        trace.losses.push(loss_val);

        if options.log_every > 0 && epoch % options.log_every == 0 {
            tracing::info!("Epoch {:>4}/{} | loss={:.6}", epoch, options.epochs, loss_val);
        }

        let grads = loss.backward();
        let grads = GradientsParams::from_grads(grads, &current);
        current = optim.step(options.learning_rate, current, grads);
    }
    *model = current;

    tracing::info!(
        "Training complete: loss {:.6} → {:.6}",
        trace.first().unwrap_or(f32::NAN),
        trace.last().unwrap_or(f32::NAN),
    );
    Ok(trace)
}

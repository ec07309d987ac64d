// ============================================================
// Layer 4 — Sample Batcher
// ============================================================
// Converts a slice of Samples into the two tensors the model
// consumes. Training is full-batch, so the whole training set
// becomes a single batch:
//
//   Input:  N Samples, each with 4 features
//   Output: features [N, 4] (float), labels [N] (int)
//
//   Features are flattened row by row, then reshaped:
//   [s1_f1, s1_f2, s1_f3, s1_f4, s2_f1, ..., sN_f4] → [N, 4]

use burn::prelude::*;

use crate::domain::sample::{Sample, FEATURE_COUNT};

// ─── SampleBatch ──────────────────────────────────────────────────────────────
/// A batch of samples ready for the model forward pass.
///
/// B is the Burn Backend, generic so the same batcher feeds both
/// the autodiff training backend and the plain evaluation backend.
#[derive(Debug, Clone)]
pub struct SampleBatch<B: Backend> {
    /// Measurements, shape [batch_size, 4]
    pub features: Tensor<B, 2>,

    /// Class codes, shape [batch_size]
    pub labels: Tensor<B, 1, Int>,
}

// ─── SampleBatcher ────────────────────────────────────────────────────────────
/// Holds the target device so tensors are created in the right place.
#[derive(Clone, Debug)]
pub struct SampleBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> SampleBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }

    pub fn batch(&self, samples: &[Sample]) -> SampleBatch<B> {
        let batch_size = samples.len();

        let features_flat: Vec<f32> = samples
            .iter()
            .flat_map(|s| s.features)
            .collect();

        // Burn Int tensors are built from i32 here and converted to the
        // backend's integer element type on creation
        let labels: Vec<i32> = samples
            .iter()
            .map(|s| s.label() as i32)
            .collect();

        let features = Tensor::<B, 1>::from_floats(features_flat.as_slice(), &self.device)
            .reshape([batch_size, FEATURE_COUNT]);

        let labels = Tensor::<B, 1, Int>::from_ints(labels.as_slice(), &self.device);

        SampleBatch { features, labels }
    }
}

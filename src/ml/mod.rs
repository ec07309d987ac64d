// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains the Burn model, loss and optimizer code.
//
//   model.rs      — ClassifierConfig and the 3-layer network
//                   4 → 8 → 9 → 3, ReLU between affine layers,
//                   seeded parameter initialisation
//
//   trainer.rs    — Full-batch training loop with Adam and
//                   cross-entropy, one loss value per epoch
//
//   evaluator.rs  — Accuracy and mean loss on a held-out set
//
//   inferencer.rs — Loads a checkpoint and classifies 4-vectors
//
// Everything runs on the CPU ndarray backend. Training wraps it
// in Autodiff; evaluation and inference use the plain backend.

use burn::backend::{Autodiff, NdArray};

pub type InferBackend = NdArray;
pub type TrainBackend = Autodiff<InferBackend>;

/// Feed-forward classifier architecture
pub mod model;

/// Training loop
pub mod trainer;

/// Held-out evaluation
pub mod evaluator;

/// Loads a checkpoint and classifies measurement vectors
pub mod inferencer;

// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates the other layers to accomplish one
// user-visible goal each.
//
// Rules for this layer:
//   - No tensor math here
//   - No printing here (that's Layer 1)
//   - Only workflow coordination
//
// Each use case owns all of the state for its run: model,
// optimizer and dataset live and die inside execute().

// The training workflow
pub mod train_use_case;

// Re-scoring a checkpoint on the held-out split
pub mod evaluate_use_case;

// Classifying measurement vectors with a checkpoint
pub mod predict_use_case;

// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// File persistence used by the application layer:
//
//   checkpoint.rs — Saving and loading model weights
//                   One file per checkpoint: a JSON header with
//                   the layer widths and format version, then the
//                   Burn record of the parameters.
//
//   metrics.rs    — Training metrics logging
//                   Writes the per-epoch loss trace to CSV for
//                   later plotting.

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Loss trace CSV logger
pub mod metrics;

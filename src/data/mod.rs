// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from the raw delimiter-separated file to tensors:
//
//   iris CSV file
//       │
//       ▼
//   CsvSampleLoader   → parses rows into Samples, rejects bad rows
//       │
//       ▼
//   split_train_test  → seeded shuffle, disjoint train/test sets
//       │
//       ▼
//   SampleBatcher     → stacks a set of Samples into tensors
//
// Each module is responsible for exactly one step.

/// Loads labelled samples from a delimiter-separated file
pub mod loader;

/// Seeded shuffle and train/test partition
pub mod splitter;

/// Builds full-batch feature and label tensors
pub mod batcher;

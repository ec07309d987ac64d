// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Writes the per-epoch training loss to a CSV file so the
// learning curve can be plotted after the run.
//
// Example CSV output:
//   epoch,train_loss
//   0,1.152031
//   1,1.131764
//   ...
//
// The file is rewritten on every run, like the checkpoint.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::ml::trainer::LossTrace;

/// One row of the loss CSV
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// Zero-based epoch index
    pub epoch:      usize,
    pub train_loss: f32,
}

pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    pub fn new(csv_path: impl Into<PathBuf>) -> Self {
        Self { csv_path: csv_path.into() }
    }

    /// Write every epoch of `trace` as one CSV row.
    pub fn write_loss_trace(&self, trace: &LossTrace) -> Result<()> {
        if trace.is_empty() {
            tracing::warn!("Loss trace is empty, writing header only");
        }
        if let Some(parent) = self.csv_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut writer = csv::Writer::from_path(&self.csv_path)
            .with_context(|| format!("Cannot create metrics file '{}'", self.csv_path.display()))?;

        for (epoch, &train_loss) in trace.values().iter().enumerate() {
            writer.serialize(EpochMetrics { epoch, train_loss })?;
        }
        writer.flush()?;

        tracing::debug!("Logged {} epochs to '{}'", trace.len(), self.csv_path.display());
        Ok(())
    }
}

// ============================================================
// Error Taxonomy
// ============================================================
// Every fallible operation below the application layer returns
// ClassifierError. The application and CLI layers wrap these
// in anyhow with extra context.
//
// All variants are fatal to the operation that raised them.
// Nothing in this crate retries.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Invalid layer width, epoch count, learning rate or split fraction
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Unparseable row, missing column or unknown label
    #[error("malformed dataset at line {line}: {reason}")]
    DataFormat { line: u64, reason: String },

    #[error("cannot read dataset '{}': {source}", path.display())]
    DatasetIo {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Unreadable/unwritable file, bad header or architecture mismatch
    #[error("checkpoint '{}': {reason}", path.display())]
    Checkpoint { path: PathBuf, reason: String },

    #[error("cannot run on an empty {0} set")]
    EmptyDataset(&'static str),
}

impl ClassifierError {
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config(reason.into())
    }

    pub fn data_format(line: u64, reason: impl Into<String>) -> Self {
        Self::DataFormat { line, reason: reason.into() }
    }

    pub fn checkpoint(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Checkpoint { path: path.into(), reason: reason.into() }
    }
}

pub type Result<T, E = ClassifierError> = std::result::Result<T, E>;

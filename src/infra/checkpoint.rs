// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores classifier weights as a single file.
//
// File layout:
//   line 1: JSON header, e.g.
//           {"magic":"iris-classifier","version":1,"widths":[4,8,9,3]}
//   rest:   model record from Burn's NamedMpkBytesRecorder
//           (MessagePack) at full (f32) precision
//
// The header lets the loader check the caller's declared
// architecture before any tensor is touched. A mismatch fails
// with a CheckpointError instead of loading parameters into
// a model of the wrong shape.
//
// Every save overwrites the file; there is one checkpoint per path.

use std::{fs, path::PathBuf};

use burn::{
    prelude::*,
    record::{FullPrecisionSettings, NamedMpkBytesRecorder, Recorder},
};
use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};
use crate::ml::model::{Classifier, ClassifierConfig};

const CHECKPOINT_MAGIC: &str = "iris-classifier";
const FORMAT_VERSION:   u32  = 1;

type CheckpointRecorder = NamedMpkBytesRecorder<FullPrecisionSettings>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointHeader {
    pub magic:   String,
    pub version: u32,
    /// Input, hidden 1, hidden 2 and output widths
    pub widths:  [usize; 4],
}

impl CheckpointHeader {
    fn for_widths(widths: [usize; 4]) -> Self {
        Self { magic: CHECKPOINT_MAGIC.to_string(), version: FORMAT_VERSION, widths }
    }
}

/// Saves and loads the checkpoint at one path.
pub struct CheckpointManager {
    path: PathBuf,
}

impl CheckpointManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Write the header and parameters of `model`, replacing any
    /// existing checkpoint at this path.
    pub fn save_model<B: Backend>(&self, model: &Classifier<B>) -> Result<()> {
        let header = CheckpointHeader::for_widths(model.widths());
        let mut bytes = serde_json::to_vec(&header)
            .map_err(|e| self.error(format!("cannot encode header: {e}")))?;
        bytes.push(b'\n');

        let record = CheckpointRecorder::default()
            .record(model.clone().into_record(), ())
            .map_err(|e| self.error(format!("cannot encode parameters: {e:?}")))?;
        bytes.extend_from_slice(&record);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| self.error(format!("cannot create directory: {e}")))?;
        }
        fs::write(&self.path, bytes).map_err(|e| self.error(format!("cannot write: {e}")))?;

        tracing::info!("Saved checkpoint to '{}' (widths {:?})", self.path.display(), header.widths);
        Ok(())
    }

    /// Load parameters into a model of the caller-declared architecture.
    /// Fails if the file's widths differ from `config`.
    pub fn load_model<B: Backend>(
        &self,
        config: &ClassifierConfig,
        device: &B::Device,
    ) -> Result<Classifier<B>> {
        config.validate()?;
        let bytes = self.read_bytes()?;
        let (header, record_bytes) = self.split_header(&bytes)?;

        if header.widths != config.widths() {
            return Err(self.error(format!(
                "architecture mismatch: checkpoint has widths {:?}, caller declared {:?}",
                header.widths,
                config.widths()
            )));
        }

        let record = CheckpointRecorder::default()
            .load(record_bytes.to_vec(), device)
            .map_err(|e| self.error(format!("cannot decode parameters: {e:?}")))?;

        // The seed only fills placeholder values that load_record replaces
        let model: Classifier<B> = config.init(0, device)?;
        let model = model.load_record(record);

        // load_record does not check tensor shapes against the header
        if model.widths() != config.widths() {
            return Err(self.error(format!(
                "architecture mismatch: checkpoint parameters have widths {:?}, caller declared {:?}",
                model.widths(),
                config.widths()
            )));
        }

        tracing::info!("Loaded checkpoint from '{}'", self.path.display());
        Ok(model)
    }

    /// Read only the header, without decoding any parameters.
    pub fn read_header(&self) -> Result<CheckpointHeader> {
        let bytes = self.read_bytes()?;
        let (header, _) = self.split_header(&bytes)?;
        Ok(header)
    }

    fn read_bytes(&self) -> Result<Vec<u8>> {
        fs::read(&self.path).map_err(|e| {
            self.error(format!("cannot read: {e}. Have you trained the model first?"))
        })
    }

    fn split_header<'a>(&self, bytes: &'a [u8]) -> Result<(CheckpointHeader, &'a [u8])> {
        let newline = bytes
            .iter()
            .position(|&b| b == b'\n')
            .ok_or_else(|| self.error("missing header"))?;

        let header: CheckpointHeader = serde_json::from_slice(&bytes[..newline])
            .map_err(|e| self.error(format!("unreadable header: {e}")))?;

        if header.magic != CHECKPOINT_MAGIC {
            return Err(self.error(format!("not a classifier checkpoint (magic '{}')", header.magic)));
        }
        if header.version != FORMAT_VERSION {
            return Err(self.error(format!(
                "unsupported format version {} (expected {FORMAT_VERSION})",
                header.version
            )));
        }
        Ok((header, &bytes[newline + 1..]))
    }

    fn error(&self, reason: impl Into<String>) -> ClassifierError {
        ClassifierError::checkpoint(&self.path, reason)
    }
}

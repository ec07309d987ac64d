// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `train`, `evaluate` and `predict`
// and all their configurable flags.
//
// Defaults give the standard iris run: hidden widths 8 and 9,
// init seed 41, split seed 33, 20% test set, 100 epochs at lr 0.01.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::application::{evaluate_use_case::EvaluateConfig, train_use_case::TrainConfig};
use crate::ml::model::ClassifierConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the classifier on a labelled dataset and save a checkpoint
    Train(TrainArgs),

    /// Re-evaluate a checkpoint on the held-out split of a dataset
    Evaluate(EvaluateArgs),

    /// Classify one 4-feature measurement with a trained checkpoint
    Predict(PredictArgs),
}

/// Hidden layer widths. Input (4) and output (3) widths are fixed
/// by the dataset; the hidden widths must match the checkpoint.
#[derive(Args, Debug, Clone)]
pub struct ArchitectureArgs {
    /// Width of the first hidden layer
    #[arg(long, default_value_t = 8)]
    pub hidden1: usize,

    /// Width of the second hidden layer
    #[arg(long, default_value_t = 9)]
    pub hidden2: usize,
}

impl From<&ArchitectureArgs> for ClassifierConfig {
    fn from(a: &ArchitectureArgs) -> Self {
        ClassifierConfig::new()
            .with_hidden1(a.hidden1)
            .with_hidden2(a.hidden2)
    }
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Delimiter-separated dataset with a header row, label last
    #[arg(long, default_value = "iris-data-set.csv")]
    pub dataset: PathBuf,

    /// Where to write the trained checkpoint (overwritten)
    #[arg(long, default_value = "iris_model.ckpt")]
    pub checkpoint: PathBuf,

    /// Optional CSV of the per-epoch training loss
    #[arg(long)]
    pub metrics: Option<PathBuf>,

    /// Optional JSON summary of config, loss trace and evaluation
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Field delimiter of the dataset
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Seed for parameter initialisation
    #[arg(long, default_value_t = 41)]
    pub seed: u64,

    /// Seed for the train/test shuffle
    #[arg(long, default_value_t = 33)]
    pub split_seed: u64,

    /// Fraction of samples held out for evaluation, in (0, 1)
    #[arg(long, default_value_t = 0.2)]
    pub test_fraction: f64,

    /// Number of full passes over the training set
    #[arg(long, default_value_t = 100)]
    pub epochs: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 0.01)]
    pub lr: f64,

    /// Log the loss every N epochs (0 = never)
    #[arg(long, default_value_t = 10)]
    pub log_every: usize,

    #[command(flatten)]
    pub architecture: ArchitectureArgs,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            dataset_path:    a.dataset,
            checkpoint_path: a.checkpoint,
            metrics_path:    a.metrics,
            summary_path:    a.summary,
            delimiter:       a.delimiter,
            seed:            a.seed,
            split_seed:      a.split_seed,
            test_fraction:   a.test_fraction,
            epochs:          a.epochs,
            lr:              a.lr,
            hidden1:         a.architecture.hidden1,
            hidden2:         a.architecture.hidden2,
            log_every:       a.log_every,
        }
    }
}

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    #[arg(long, default_value = "iris-data-set.csv")]
    pub dataset: PathBuf,

    #[arg(long, default_value = "iris_model.ckpt")]
    pub checkpoint: PathBuf,

    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Must match the split seed used for training
    #[arg(long, default_value_t = 33)]
    pub split_seed: u64,

    /// Must match the test fraction used for training
    #[arg(long, default_value_t = 0.2)]
    pub test_fraction: f64,

    #[command(flatten)]
    pub architecture: ArchitectureArgs,
}

impl From<EvaluateArgs> for EvaluateConfig {
    fn from(a: EvaluateArgs) -> Self {
        EvaluateConfig {
            dataset_path:    a.dataset,
            checkpoint_path: a.checkpoint,
            delimiter:       a.delimiter,
            split_seed:      a.split_seed,
            test_fraction:   a.test_fraction,
            hidden1:         a.architecture.hidden1,
            hidden2:         a.architecture.hidden2,
        }
    }
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Four comma-separated measurements, e.g. 5.6,3.7,2.2,0.5
    #[arg(long, required = true, value_delimiter = ',', allow_negative_numbers = true)]
    pub features: Vec<f32>,

    #[arg(long, default_value = "iris_model.ckpt")]
    pub checkpoint: PathBuf,

    #[command(flatten)]
    pub architecture: ArchitectureArgs,
}

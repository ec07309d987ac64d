// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and hands off to Layer 2.
// This is the only layer that prints results for the user;
// progress goes through tracing.
//
// Three commands are supported:
//   1. `train`    — trains, evaluates and checkpoints the model
//   2. `evaluate` — re-scores a checkpoint on the held-out split
//   3. `predict`  — classifies one measurement vector

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, EvaluateArgs, PredictArgs, TrainArgs};

use crate::ml::model::ClassifierConfig;

#[derive(Parser, Debug)]
#[command(
    name = "iris-trainer",
    version,
    about = "Train a small feed-forward iris classifier, then evaluate it or classify measurements."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)    => run_train(args),
            Commands::Evaluate(args) => run_evaluate(args),
            Commands::Predict(args)  => run_predict(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    tracing::info!("Starting training on dataset: {}", args.dataset.display());

    let checkpoint = args.checkpoint.clone();
    let summary = TrainUseCase::new(args.into()).execute()?;
    let eval = &summary.evaluation;

    println!(
        "Trained on {} samples, tested on {}: {}/{} correct ({:.1}%), test loss {:.4}",
        summary.train_samples,
        summary.test_samples,
        eval.correct,
        eval.total,
        eval.accuracy * 100.0,
        eval.mean_loss,
    );
    println!("Checkpoint saved to {}", checkpoint.display());
    Ok(())
}

fn run_evaluate(args: EvaluateArgs) -> Result<()> {
    use crate::application::evaluate_use_case::EvaluateUseCase;

    let eval = EvaluateUseCase::new(args.into()).execute()?;
    println!(
        "{}/{} correct ({:.1}%), loss {:.4}",
        eval.correct,
        eval.total,
        eval.accuracy * 100.0,
        eval.mean_loss,
    );
    Ok(())
}

fn run_predict(args: PredictArgs) -> Result<()> {
    use crate::application::predict_use_case::PredictUseCase;

    let config = ClassifierConfig::from(&args.architecture);
    let use_case = PredictUseCase::new(args.checkpoint, &config)?;
    let prediction = use_case.predict(&args.features)?;

    println!("Scores: {:?}", prediction.scores);
    println!(
        "Prediction: {} ({:.1}%)",
        prediction.species,
        prediction.confidence() * 100.0,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::train_use_case::TrainConfig;

    #[test]
    fn test_train_defaults() {
        let cli = Cli::try_parse_from(["iris-trainer", "train"]).unwrap();
        let Commands::Train(args) = cli.command else { panic!("expected train") };
        let cfg: TrainConfig = args.into();

        assert_eq!(cfg.epochs, 100);
        assert_eq!(cfg.lr, 0.01);
        assert_eq!(cfg.seed, 41);
        assert_eq!(cfg.split_seed, 33);
        assert_eq!(cfg.test_fraction, 0.2);
        assert_eq!((cfg.hidden1, cfg.hidden2), (8, 9));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_predict_parses_feature_list() {
        let cli = Cli::try_parse_from([
            "iris-trainer", "predict", "--features", "5.6,3.7,2.2,0.5", "--hidden1", "16",
        ])
        .unwrap();
        let Commands::Predict(args) = cli.command else { panic!("expected predict") };

        assert_eq!(args.features, vec![5.6, 3.7, 2.2, 0.5]);
        assert_eq!(ClassifierConfig::from(&args.architecture).widths(), [4, 16, 9, 3]);
    }
}

//! Training stage: persisted dataset artifact in, checkpoints and metric
//! logs out.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use kanjou_trainer::{run_training, TrainConfig};
use tracing::info;

/// CLI arguments
#[derive(Parser)]
#[command(name = "train")]
#[command(about = "Train the LSTM emotion classifier on a preprocessed dataset artifact")]
#[command(version)]
struct Cli {
    /// Path to the dataset artifact written by `preprocess`
    #[arg(short, long)]
    data: PathBuf,

    /// Directory receiving the timestamped run directory
    #[arg(short, long, default_value = "runs")]
    log_dir: PathBuf,

    /// Number of optimizer steps
    #[arg(long, default_value_t = 8000)]
    iterations: usize,

    /// Mini-batch size (label-balanced when even)
    #[arg(long, default_value_t = 24)]
    batch_size: usize,

    /// AdamW learning rate
    #[arg(long, default_value_t = 1e-3)]
    learning_rate: f64,

    /// Hidden units per LSTM layer
    #[arg(long, default_value_t = 24)]
    lstm_units: usize,

    /// Number of stacked LSTM layers
    #[arg(long, default_value_t = 4)]
    num_layers: usize,

    /// Dropout probability on each layer's output during training
    #[arg(long, default_value_t = 0.25)]
    dropout: f32,

    /// Checkpoint cadence, in steps
    #[arg(long, default_value_t = 1000)]
    checkpoint_every: usize,

    /// Metric reporting cadence, in steps
    #[arg(long, default_value_t = 100)]
    report_every: usize,

    /// Sampler seed
    #[arg(long, default_value_t = 1337)]
    seed: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let cfg = TrainConfig {
        iterations: cli.iterations,
        batch_size: cli.batch_size,
        learning_rate: cli.learning_rate,
        lstm_units: cli.lstm_units,
        num_layers: cli.num_layers,
        dropout: cli.dropout,
        checkpoint_every: cli.checkpoint_every,
        report_every: cli.report_every,
        seed: cli.seed,
    };

    let run_dir = run_training(&cli.data, &cli.log_dir, cfg)?;
    info!(dir = %run_dir.display(), "training complete");
    Ok(())
}

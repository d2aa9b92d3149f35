//! Training loop for the emotion classifier.
//!
//! Consumes a persisted [`DatasetArtifact`], feeds label-alternating
//! batches through the LSTM stack, and writes checkpoints and scalar
//! metric logs into a timestamped run directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{ensure, Context, Result};
use candle_core::{DType, Device, Tensor, D};
use candle_nn::{loss, AdamW, Optimizer, ParamsAdamW, VarBuilder, VarMap};
use kanjou_core::DatasetArtifact;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::metrics::MetricsWriter;
use crate::model::{ClassifierConfig, EmotionClassifier};
use crate::sampler::{Batch, BatchSampler, DEFAULT_BATCH_SIZE, HAS_EMOTION_LABEL};

/// Hyperparameters of one training run, persisted as `config.json` in the
/// run directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub iterations: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    pub lstm_units: usize,
    pub num_layers: usize,
    pub dropout: f32,
    pub checkpoint_every: usize,
    pub report_every: usize,
    pub seed: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            iterations: 8000,
            batch_size: DEFAULT_BATCH_SIZE,
            learning_rate: 1e-3,
            lstm_units: 24,
            num_layers: 4,
            dropout: 0.25,
            checkpoint_every: 1000,
            report_every: 100,
            seed: 1337,
        }
    }
}

/// Owns the model, optimizer, and samplers for one training run.
pub struct Trainer {
    data: DatasetArtifact,
    cfg: TrainConfig,
    model: EmotionClassifier,
    varmap: VarMap,
    opt: AdamW,
    train_sampler: BatchSampler,
    test_sampler: BatchSampler,
    device: Device,
}

impl Trainer {
    /// Builds the classifier over `data`, seeding the embedding layer from
    /// the artifact's pretrained table.
    pub fn new(data: DatasetArtifact, cfg: TrainConfig) -> Result<Self> {
        ensure!(
            !data.train_has_emotion.is_empty()
                && !data.train_no_emotion.is_empty()
                && !data.test_has_emotion.is_empty()
                && !data.test_no_emotion.is_empty(),
            "dataset artifact has an empty train or test pool"
        );

        let device = Device::Cpu;
        let mut varmap = VarMap::new();
        let vb = VarBuilder::from_varmap(&varmap, DType::F32, &device);

        let vocab_size = data.embedding.rows();
        let classifier_cfg = ClassifierConfig {
            embedding_dim: data.embedding.dim(),
            lstm_units: cfg.lstm_units,
            num_layers: cfg.num_layers,
            dropout: cfg.dropout,
        };
        let model = EmotionClassifier::new(vocab_size, &classifier_cfg, vb)?;

        let pretrained = Tensor::from_slice(
            data.embedding.as_flat(),
            (vocab_size, data.embedding.dim()),
            &device,
        )?;
        varmap
            .set_one("embed.weight", &pretrained)
            .context("seeding embedding layer from pretrained table")?;

        let opt = AdamW::new(
            varmap.all_vars(),
            ParamsAdamW {
                lr: cfg.learning_rate,
                ..Default::default()
            },
        )?;

        let train_sampler = BatchSampler::new(cfg.batch_size, cfg.seed);
        let test_sampler = BatchSampler::new(cfg.batch_size, cfg.seed.wrapping_add(1));

        Ok(Self {
            data,
            cfg,
            model,
            varmap,
            opt,
            train_sampler,
            test_sampler,
            device,
        })
    }

    /// Runs the full iteration loop, returning the run directory.
    pub fn run(&mut self, log_dir: &Path) -> Result<PathBuf> {
        let run_dir = log_dir.join(format!("run-{}", unix_timestamp()));
        let ckpt_dir = run_dir.join("checkpoints");
        fs::create_dir_all(&ckpt_dir)
            .with_context(|| format!("creating run directory {}", run_dir.display()))?;
        fs::write(
            run_dir.join("config.json"),
            serde_json::to_string_pretty(&self.cfg)?,
        )?;
        let mut train_metrics = MetricsWriter::create(run_dir.join("train.csv"))?;
        let mut test_metrics = MetricsWriter::create(run_dir.join("test.csv"))?;
        info!(dir = %run_dir.display(), iterations = self.cfg.iterations, "starting training run");

        for step in 0..self.cfg.iterations {
            let batch = self
                .train_sampler
                .sample(&self.data.train_has_emotion, &self.data.train_no_emotion);
            let (inputs, targets) = self.batch_tensors(&batch)?;
            let logits = self.model.forward(&inputs, true)?;
            let loss = loss::cross_entropy(&logits, &targets)?;
            self.opt.backward_step(&loss)?;

            if step % self.cfg.report_every == 0 {
                let (train_loss, train_acc) = self.evaluate(&batch)?;
                train_metrics.record(step, train_loss, train_acc)?;

                let test_batch = self
                    .test_sampler
                    .sample(&self.data.test_has_emotion, &self.data.test_no_emotion);
                let (test_loss, test_acc) = self.evaluate(&test_batch)?;
                test_metrics.record(step, test_loss, test_acc)?;

                info!(step, train_loss, train_acc, test_loss, test_acc, "progress");
            }

            if step % self.cfg.checkpoint_every == 0 && step != 0 {
                let path = ckpt_dir.join(format!("step-{step}.safetensors"));
                self.varmap
                    .save(&path)
                    .with_context(|| format!("saving checkpoint {}", path.display()))?;
                info!(path = %path.display(), "saved checkpoint");
            }
        }

        Ok(run_dir)
    }

    /// Loss and accuracy of the current model on `batch`, dropout off.
    fn evaluate(&self, batch: &Batch) -> Result<(f32, f32)> {
        let (inputs, targets) = self.batch_tensors(batch)?;
        let logits = self.model.forward(&inputs, false)?;
        let loss = loss::cross_entropy(&logits, &targets)?.to_scalar::<f32>()?;
        let accuracy = logits
            .argmax(D::Minus1)?
            .eq(&targets)?
            .to_dtype(DType::F32)?
            .mean_all()?
            .to_scalar::<f32>()?;
        Ok((loss, accuracy))
    }

    /// Lifts a sampled batch into input and class-index tensors.
    fn batch_tensors(&self, batch: &Batch) -> Result<(Tensor, Tensor)> {
        let rows = batch.len();
        let seq_len = batch.inputs.first().map_or(0, Vec::len);
        let flat: Vec<u32> = batch.inputs.iter().flatten().copied().collect();
        let inputs = Tensor::from_vec(flat, (rows, seq_len), &self.device)?;
        let classes: Vec<u32> = batch
            .labels
            .iter()
            .map(|&l| u32::from(l != HAS_EMOTION_LABEL))
            .collect();
        let targets = Tensor::from_vec(classes, (rows,), &self.device)?;
        Ok((inputs, targets))
    }
}

/// Loads the artifact at `data_path` and runs a full training session.
pub fn run_training(data_path: &Path, log_dir: &Path, cfg: TrainConfig) -> Result<PathBuf> {
    let data = DatasetArtifact::load(data_path)
        .with_context(|| format!("loading dataset artifact {}", data_path.display()))?;
    info!(
        train_has = data.train_has_emotion.len(),
        train_no = data.train_no_emotion.len(),
        test_has = data.test_has_emotion.len(),
        test_no = data.test_no_emotion.len(),
        vocab = data.embedding.rows(),
        "loaded dataset artifact"
    );
    let mut trainer = Trainer::new(data, cfg)?;
    trainer.run(log_dir)
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

//! Multi-layer LSTM classifier over encoded tweet sequences.
//!
//! Embedding lookup seeded from the pretrained table, a stack of LSTM
//! layers with dropout on each layer's output, and a final linear
//! projection of the last timestep down to the two classes.

use candle_core::{Result, Tensor};
use candle_nn::{
    embedding, linear, lstm, Dropout, Embedding, LSTMConfig, Linear, Module, VarBuilder, LSTM, RNN,
};

/// Presence/absence of the target emotion.
pub const NUM_CLASSES: usize = 2;

/// Hyperparameters of the classifier graph.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Width of the embedding vectors.
    pub embedding_dim: usize,
    /// Hidden units per LSTM layer.
    pub lstm_units: usize,
    /// Number of stacked LSTM layers.
    pub num_layers: usize,
    /// Dropout probability applied to each layer's output while training.
    pub dropout: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            embedding_dim: kanjou_core::DEFAULT_EMBEDDING_DIM,
            lstm_units: 24,
            num_layers: 4,
            dropout: 0.25,
        }
    }
}

/// The trainable sequence classifier.
pub struct EmotionClassifier {
    embed: Embedding,
    layers: Vec<LSTM>,
    dropout: Dropout,
    fc: Linear,
}

impl EmotionClassifier {
    /// Builds the graph under `vb`. The embedding weight lives at
    /// `embed.weight` so the trainer can overwrite it with the pretrained
    /// table after construction.
    pub fn new(vocab_size: usize, cfg: &ClassifierConfig, vb: VarBuilder) -> Result<Self> {
        let embed = embedding(vocab_size, cfg.embedding_dim, vb.pp("embed"))?;
        let mut layers = Vec::with_capacity(cfg.num_layers);
        for i in 0..cfg.num_layers {
            let in_dim = if i == 0 {
                cfg.embedding_dim
            } else {
                cfg.lstm_units
            };
            layers.push(lstm(
                in_dim,
                cfg.lstm_units,
                LSTMConfig::default(),
                vb.pp(format!("lstm{i}")),
            )?);
        }
        let fc = linear(cfg.lstm_units, NUM_CLASSES, vb.pp("fc"))?;
        Ok(Self {
            embed,
            layers,
            dropout: Dropout::new(cfg.dropout),
            fc,
        })
    }

    /// Computes logits of shape `(batch, 2)` for index sequences of shape
    /// `(batch, seq_len)`. Dropout is active only when `train` is set.
    pub fn forward(&self, input_ids: &Tensor, train: bool) -> Result<Tensor> {
        let mut xs = self.embed.forward(input_ids)?;
        for layer in &self.layers {
            let states = layer.seq(&xs)?;
            xs = layer.states_to_tensor(&states)?;
            xs = self.dropout.forward(&xs, train)?;
        }
        let (_batch, seq_len, _hidden) = xs.dims3()?;
        let last = xs.narrow(1, seq_len - 1, 1)?.squeeze(1)?;
        self.fc.forward(&last)
    }
}

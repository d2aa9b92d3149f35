//! # Kanjou Trainer
//!
//! Training stage of the kanjou pipeline: label-alternating batch
//! sampling over a persisted dataset artifact and a multi-layer LSTM
//! classifier trained with checkpoint and scalar-metric side effects.
//! The `preprocess` binary builds the artifact; the `train` binary
//! consumes it.

pub mod metrics;
pub mod model;
pub mod sampler;
pub mod trainer;

pub use metrics::MetricsWriter;
pub use model::{ClassifierConfig, EmotionClassifier, NUM_CLASSES};
pub use sampler::{Batch, BatchSampler, DEFAULT_BATCH_SIZE};
pub use trainer::{run_training, TrainConfig, Trainer};

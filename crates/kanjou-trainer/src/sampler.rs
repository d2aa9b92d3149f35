//! Label-alternating mini-batch sampling.
//!
//! Batches are drawn uniformly at random with replacement: even batch
//! positions come from the has-emotion pool with label `[1, 0]`, odd
//! positions from the no-emotion pool with `[0, 1]`. There is no coverage
//! or exhaustion guarantee; repeats within and across batches are expected
//! for stochastic-gradient training.

use oorandom::Rand32;

/// One-hot label for a sequence drawn from the has-emotion pool.
pub const HAS_EMOTION_LABEL: [f32; 2] = [1.0, 0.0];
/// One-hot label for a sequence drawn from the no-emotion pool.
pub const NO_EMOTION_LABEL: [f32; 2] = [0.0, 1.0];

/// Default mini-batch size of the shipped configuration.
pub const DEFAULT_BATCH_SIZE: usize = 24;

/// A sampled mini-batch of encoded sequences with one-hot labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub inputs: Vec<Vec<u32>>,
    pub labels: Vec<[f32; 2]>,
}

impl Batch {
    /// Number of rows in the batch.
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// True for a zero-row batch (batch size 0).
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

/// Random batch sampler over a pair of label pools.
pub struct BatchSampler {
    batch_size: usize,
    rng: Rand32,
}

impl BatchSampler {
    /// Creates a sampler producing batches of `batch_size` rows, seeded
    /// for reproducibility.
    pub fn new(batch_size: usize, seed: u64) -> Self {
        Self {
            batch_size,
            rng: Rand32::new(seed),
        }
    }

    /// Draws one batch, alternating between `has_emotion` (even positions)
    /// and `no_emotion` (odd positions). Both pools must be non-empty.
    pub fn sample(&mut self, has_emotion: &[Vec<u32>], no_emotion: &[Vec<u32>]) -> Batch {
        debug_assert!(!has_emotion.is_empty() && !no_emotion.is_empty());

        let mut inputs = Vec::with_capacity(self.batch_size);
        let mut labels = Vec::with_capacity(self.batch_size);
        for i in 0..self.batch_size {
            let (pool, label) = if i % 2 == 0 {
                (has_emotion, HAS_EMOTION_LABEL)
            } else {
                (no_emotion, NO_EMOTION_LABEL)
            };
            let idx = self.rng.rand_range(0..pool.len() as u32) as usize;
            inputs.push(pool[idx].clone());
            labels.push(label);
        }
        Batch { inputs, labels }
    }
}

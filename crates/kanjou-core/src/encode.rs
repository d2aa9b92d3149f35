//! # Sequence Encoder
//!
//! Maps normalized text to a fixed-length array of lexicon indices. This
//! is the load-bearing boundary of the pipeline: downstream consumers rely
//! on fixed-width, zero-padded, left-aligned index arrays.

use crate::embedding::Lexicon;

/// Fixed encoded-sequence length used by the shipped configuration.
pub const MAX_TWEET_LEN: usize = 35;

/// Encoder from whitespace-tokenized text to fixed-length index arrays.
#[derive(Debug, Clone, Copy)]
pub struct SequenceEncoder {
    max_len: usize,
}

impl SequenceEncoder {
    /// Creates an encoder producing arrays of exactly `max_len` entries.
    pub fn new(max_len: usize) -> Self {
        Self { max_len }
    }

    /// The fixed output length.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Encodes normalized `text` against `lexicon`.
    ///
    /// Tokens are looked up in order; a miss substitutes the lexicon's
    /// unknown sentinel; tokens past `max_len` are silently discarded;
    /// unfilled positions stay at the padding index. The returned vector
    /// is always exactly `max_len` long and the call never fails.
    pub fn encode(&self, text: &str, lexicon: &Lexicon) -> Vec<u32> {
        let mut ids = vec![lexicon.padding_index(); self.max_len];
        for (slot, token) in ids.iter_mut().zip(text.split_whitespace()) {
            *slot = lexicon.index_or_unknown(token);
        }
        ids
    }
}

impl Default for SequenceEncoder {
    fn default() -> Self {
        Self::new(MAX_TWEET_LEN)
    }
}

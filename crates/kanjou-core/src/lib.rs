//! # Kanjou Core
//!
//! Preprocessing pipeline for emotion classification of short
//! social-media text: tweet normalization, pretrained-embedding lexicon
//! loading, fixed-length index encoding, and deterministic train/test
//! dataset construction.
//!
//! ## Quick Start
//!
//! ```rust
//! use kanjou_core::{Normalizer, SequenceEncoder, WordEmbeddings};
//!
//! let embeddings =
//!     WordEmbeddings::from_reader("so 0.1 0.2\nangry 0.3 0.4\n".as_bytes(), 2).unwrap();
//! let normalizer = Normalizer::new().unwrap();
//! let encoder = SequenceEncoder::new(5);
//!
//! let text = normalizer.normalize("@you SOOOO angry!!!");
//! let ids = encoder.encode(&text, &embeddings.lexicon);
//! assert_eq!(ids.len(), 5);
//! ```
pub mod corpus;
pub mod dataset;
pub mod embedding;
pub mod encode;
pub mod error;
pub mod normalize;

// Re-export primary API
pub use corpus::{load_corpus, parse_corpus, TweetRecord, TEXT_COLUMN};
pub use dataset::{split_dataset, DatasetArtifact, SplitDataset, DEFAULT_TEST_FRACTION};
pub use embedding::{
    EmbeddingTable, Lexicon, WordEmbeddings, DEFAULT_EMBEDDING_DIM,
    DEFAULT_RESERVED_ROW_SEED, PAD_INDEX,
};
pub use encode::{SequenceEncoder, MAX_TWEET_LEN};
pub use error::{KanjouError, Result};
pub use normalize::Normalizer;

//! # Embedding Loader
//!
//! Parses a whitespace-delimited embedding file (GloVe text format) into a
//! token-to-index lexicon plus an index-aligned dense vector table. Index 0
//! is reserved for padding and the final index for the unknown-token
//! sentinel; both reserved rows are randomly initialized rather than read
//! from the file. Built once at pipeline start and immutable afterwards.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use oorandom::Rand32;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{KanjouError, Result};

/// Vector dimension of the shipped GloVe Twitter embeddings.
pub const DEFAULT_EMBEDDING_DIM: usize = 50;

/// Reserved lexicon index for padding.
pub const PAD_INDEX: u32 = 0;

/// Default seed for the two random reserved rows, so repeated loads of
/// the same file produce an identical table unless the caller asks for a
/// different seed.
pub const DEFAULT_RESERVED_ROW_SEED: u64 = 0x6b61_6e6a_6f75;

/// Token-to-index vocabulary mapping.
///
/// Indices are contiguous and dense: 0 is padding, file rows occupy
/// `1..=n` in read order, and the unknown sentinel sits at `n + 1`. There
/// is exactly one unknown index; every lookup miss resolves to it.
#[derive(Debug, Clone)]
pub struct Lexicon {
    index: HashMap<String, u32>,
    unknown: u32,
}

impl Lexicon {
    /// Looks up the index for `token`, if present.
    pub fn lookup(&self, token: &str) -> Option<u32> {
        self.index.get(token).copied()
    }

    /// Looks up `token`, falling back to the unknown sentinel. Never fails.
    pub fn index_or_unknown(&self, token: &str) -> u32 {
        self.lookup(token).unwrap_or(self.unknown)
    }

    /// The unknown-token sentinel index (always the final index).
    pub fn unknown_index(&self) -> u32 {
        self.unknown
    }

    /// The padding index (always 0).
    pub fn padding_index(&self) -> u32 {
        PAD_INDEX
    }

    /// Total number of indices, reserved entries included.
    pub fn len(&self) -> usize {
        self.unknown as usize + 1
    }

    /// True if the lexicon holds no file-derived tokens.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Dense float vector table, index-aligned with a [`Lexicon`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingTable {
    dim: usize,
    data: Vec<f32>,
}

impl EmbeddingTable {
    /// Vector dimensionality, identical for every row.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of rows, reserved rows included.
    pub fn rows(&self) -> usize {
        self.data.len() / self.dim
    }

    /// The vector at lexicon index `i`.
    pub fn row(&self, i: u32) -> Option<&[f32]> {
        let start = i as usize * self.dim;
        self.data.get(start..start + self.dim)
    }

    /// The whole table as a flat row-major slice.
    pub fn as_flat(&self) -> &[f32] {
        &self.data
    }
}

/// The lexicon/table pair loaded from one embedding file.
///
/// An explicitly constructed, immutable value object: build it once at
/// startup and pass it by reference into the encoder and trainer.
#[derive(Debug, Clone)]
pub struct WordEmbeddings {
    pub lexicon: Lexicon,
    pub table: EmbeddingTable,
}

impl WordEmbeddings {
    /// Loads embeddings from a file at `path`, expecting `dim` floats per
    /// row. Rows with a different dimension count or unparseable values
    /// are skipped with a diagnostic.
    ///
    /// # Errors
    ///
    /// A missing or unreadable file is fatal; a file that yields zero
    /// usable rows is `KanjouError::EmptyEmbedding`.
    pub fn load(path: impl AsRef<Path>, dim: usize) -> Result<Self> {
        Self::load_seeded(path, dim, DEFAULT_RESERVED_ROW_SEED)
    }

    /// Like [`WordEmbeddings::load`], but with a caller-chosen seed for
    /// the random padding and unknown rows.
    pub fn load_seeded(path: impl AsRef<Path>, dim: usize, seed: u64) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| KanjouError::io(path, e))?;
        let loaded = Self::from_reader_seeded(BufReader::new(file), dim, seed)?;
        info!(
            path = %path.display(),
            tokens = loaded.lexicon.len(),
            dim,
            "loaded embedding file"
        );
        Ok(loaded)
    }

    /// Reader-based variant of [`WordEmbeddings::load`].
    pub fn from_reader<R: BufRead>(reader: R, dim: usize) -> Result<Self> {
        Self::from_reader_seeded(reader, dim, DEFAULT_RESERVED_ROW_SEED)
    }

    /// Reader-based variant of [`WordEmbeddings::load_seeded`].
    pub fn from_reader_seeded<R: BufRead>(reader: R, dim: usize, seed: u64) -> Result<Self> {
        let mut index = HashMap::new();
        let mut data: Vec<f32> = Vec::new();
        let mut rows: u32 = 0;

        for (line_no, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| KanjouError::io("<embedding stream>", e))?;
            let mut parts = line.split_whitespace();
            let Some(token) = parts.next() else {
                continue;
            };
            let parsed: std::result::Result<Vec<f32>, _> =
                parts.map(|v| v.parse::<f32>()).collect();
            let vector = match parsed {
                Ok(v) if v.len() == dim => v,
                _ => {
                    warn!(line = line_no + 1, "skipping malformed embedding row");
                    continue;
                }
            };
            rows += 1;
            index.insert(token.to_string(), rows);
            data.extend_from_slice(&vector);
        }

        if rows == 0 {
            return Err(KanjouError::EmptyEmbedding);
        }

        // Padding row at the front, unknown row at the back.
        let mut rng = Rand32::new(seed);
        let pad: Vec<f32> = (0..dim).map(|_| rng.rand_float() - 0.5).collect();
        let unk: Vec<f32> = (0..dim).map(|_| rng.rand_float() - 0.5).collect();
        data.splice(0..0, pad);
        data.extend(unk);

        Ok(Self {
            lexicon: Lexicon {
                index,
                unknown: rows + 1,
            },
            table: EmbeddingTable { dim, data },
        })
    }
}

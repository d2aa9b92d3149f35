//! # Dataset Splitter and Persisted Artifact
//!
//! Partitions encoded sequences into label-balanced train/test groups and
//! serializes them, together with the embedding table, into the single
//! binary artifact the training stage consumes.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::embedding::EmbeddingTable;
use crate::error::{KanjouError, Result};

/// Default fraction of each label pool reserved for testing.
pub const DEFAULT_TEST_FRACTION: f32 = 0.2;

/// The four disjoint train/test groups of encoded sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitDataset {
    pub train_has_emotion: Vec<Vec<u32>>,
    pub train_no_emotion: Vec<Vec<u32>>,
    pub test_has_emotion: Vec<Vec<u32>>,
    pub test_no_emotion: Vec<Vec<u32>>,
}

/// Splits the two label pools into train/test groups.
///
/// The first `floor(test_fraction * len)` rows of each pool become its
/// test split, the remainder the train split. Deliberately no shuffling:
/// with a fixed corpus ordering the split is reproducible across runs.
/// Fractions outside `0.0..=1.0` are clamped, so a fraction of 1.0 or
/// more puts the whole pool in the test split.
pub fn split_dataset(
    has_emotion: Vec<Vec<u32>>,
    no_emotion: Vec<Vec<u32>>,
    test_fraction: f32,
) -> SplitDataset {
    let (test_has_emotion, train_has_emotion) = split_pool(has_emotion, test_fraction);
    let (test_no_emotion, train_no_emotion) = split_pool(no_emotion, test_fraction);
    SplitDataset {
        train_has_emotion,
        train_no_emotion,
        test_has_emotion,
        test_no_emotion,
    }
}

fn split_pool(mut pool: Vec<Vec<u32>>, test_fraction: f32) -> (Vec<Vec<u32>>, Vec<Vec<u32>>) {
    // Float-to-int casts saturate, so a negative fraction yields 0; the
    // upper bound still needs an explicit clamp before split_off.
    let test_len = ((test_fraction * pool.len() as f32) as usize).min(pool.len());
    let train = pool.split_off(test_len);
    (pool, train)
}

/// The serialized container consumed by the training stage.
///
/// Field order is the wire order: the four sequence groups followed by the
/// embedding table. Consumers must deserialize in exactly this order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetArtifact {
    pub train_has_emotion: Vec<Vec<u32>>,
    pub train_no_emotion: Vec<Vec<u32>>,
    pub test_has_emotion: Vec<Vec<u32>>,
    pub test_no_emotion: Vec<Vec<u32>>,
    pub embedding: EmbeddingTable,
}

impl DatasetArtifact {
    /// Bundles a split with its embedding table.
    pub fn new(split: SplitDataset, embedding: EmbeddingTable) -> Self {
        Self {
            train_has_emotion: split.train_has_emotion,
            train_no_emotion: split.train_no_emotion,
            test_has_emotion: split.test_has_emotion,
            test_no_emotion: split.test_no_emotion,
            embedding,
        }
    }

    /// Writes the artifact to `path` with bincode.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| KanjouError::io(path, e))?;
        bincode::serialize_into(BufWriter::new(file), self)?;
        info!(
            path = %path.display(),
            train_has = self.train_has_emotion.len(),
            train_no = self.train_no_emotion.len(),
            test_has = self.test_has_emotion.len(),
            test_no = self.test_no_emotion.len(),
            "wrote dataset artifact"
        );
        Ok(())
    }

    /// Reads an artifact back, unchanged, from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| KanjouError::io(path, e))?;
        Ok(bincode::deserialize_from(BufReader::new(file))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::WordEmbeddings;

    fn rows(n: usize) -> Vec<Vec<u32>> {
        (0..n).map(|i| vec![i as u32; 3]).collect()
    }

    #[test]
    fn test_split_length_is_floor_of_fraction() {
        let split = split_dataset(rows(10), rows(7), 0.2);
        assert_eq!(split.test_has_emotion.len(), 2);
        assert_eq!(split.train_has_emotion.len(), 8);
        // floor(0.2 * 7) == 1
        assert_eq!(split.test_no_emotion.len(), 1);
        assert_eq!(split.train_no_emotion.len(), 6);
    }

    #[test]
    fn splits_are_disjoint_and_sum_to_the_pool() {
        let pool = rows(9);
        let split = split_dataset(pool.clone(), Vec::new(), 0.3);
        assert_eq!(
            split.test_has_emotion.len() + split.train_has_emotion.len(),
            pool.len()
        );
        for row in &split.test_has_emotion {
            assert!(!split.train_has_emotion.contains(row));
        }
    }

    #[test]
    fn split_is_deterministic_without_shuffling() {
        let split = split_dataset(rows(5), Vec::new(), 0.4);
        // First rows land in test, in corpus order.
        assert_eq!(split.test_has_emotion, rows(5)[..2].to_vec());
        assert_eq!(split.train_has_emotion, rows(5)[2..].to_vec());
    }

    #[test]
    fn empty_pools_split_cleanly() {
        let split = split_dataset(Vec::new(), Vec::new(), 0.2);
        assert!(split.test_has_emotion.is_empty());
        assert!(split.train_has_emotion.is_empty());
    }

    #[test]
    fn out_of_range_fractions_are_clamped() {
        let split = split_dataset(rows(4), Vec::new(), 1.5);
        assert_eq!(split.test_has_emotion.len(), 4);
        assert!(split.train_has_emotion.is_empty());

        let split = split_dataset(rows(4), Vec::new(), -0.5);
        assert!(split.test_has_emotion.is_empty());
        assert_eq!(split.train_has_emotion.len(), 4);
    }

    #[test]
    fn artifact_roundtrips_through_bincode() {
        let emb = WordEmbeddings::from_reader("a 0.1 0.2\nb 0.3 0.4\n".as_bytes(), 2).unwrap();
        let artifact = DatasetArtifact::new(
            split_dataset(rows(4), rows(4), 0.25),
            emb.table,
        );
        let bytes = bincode::serialize(&artifact).unwrap();
        let back: DatasetArtifact = bincode::deserialize(&bytes).unwrap();
        assert_eq!(artifact, back);
    }
}

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during kanjou core operations.
#[derive(Debug, Error)]
pub enum KanjouError {
    /// The embedding file yielded no usable rows.
    #[error("embedding file contains no rows of the expected dimension")]
    EmptyEmbedding,

    /// A required corpus column is absent from the header row.
    #[error("corpus is missing required column {name:?}")]
    MissingColumn {
        /// The column that could not be found.
        name: String,
    },

    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    Regex(#[from] regex::Error),

    /// File I/O failure. Fatal; the pipeline never retries.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// The file being read or written.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Corpus file could not be parsed as tab-separated records.
    #[error("corpus parse error: {0}")]
    Corpus(#[from] csv::Error),

    /// The dataset artifact could not be encoded or decoded.
    #[error("dataset artifact serialization error: {0}")]
    Artifact(#[from] bincode::Error),
}

impl KanjouError {
    /// Wraps an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for kanjou operations.
pub type Result<T> = std::result::Result<T, KanjouError>;

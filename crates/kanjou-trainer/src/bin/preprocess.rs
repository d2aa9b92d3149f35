//! Preprocessing stage: raw corpus + pretrained embeddings in, persisted
//! dataset artifact out.
//!
//! Normalizes every tweet, encodes it against the embedding lexicon,
//! partitions by the target emotion's indicator, splits deterministically
//! into train/test, and serializes the four groups together with the
//! embedding table.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use kanjou_core::{
    load_corpus, split_dataset, DatasetArtifact, Normalizer, SequenceEncoder, TweetRecord,
    WordEmbeddings, DEFAULT_EMBEDDING_DIM, DEFAULT_RESERVED_ROW_SEED, DEFAULT_TEST_FRACTION,
    MAX_TWEET_LEN,
};
use tracing::info;

/// CLI arguments
#[derive(Parser)]
#[command(name = "preprocess")]
#[command(about = "Build the encoded train/test dataset artifact from raw tweet corpora")]
#[command(version)]
struct Cli {
    /// Path to the whitespace-delimited embedding file (GloVe text format)
    #[arg(short, long)]
    embeddings: PathBuf,

    /// Expected embedding vector dimension; mismatched rows are skipped
    #[arg(short, long, default_value_t = DEFAULT_EMBEDDING_DIM)]
    dim: usize,

    /// Tab-separated corpus file(s), concatenated in argument order
    #[arg(short, long, required = true)]
    corpus: Vec<PathBuf>,

    /// Header name of the binary emotion indicator column
    #[arg(long, default_value = "anger")]
    emotion: String,

    /// Fraction of each label pool reserved for testing
    #[arg(long, default_value_t = DEFAULT_TEST_FRACTION)]
    test_fraction: f32,

    /// Fixed encoded-sequence length
    #[arg(long, default_value_t = MAX_TWEET_LEN)]
    max_len: usize,

    /// Seed for the random padding and unknown embedding rows
    #[arg(long, default_value_t = DEFAULT_RESERVED_ROW_SEED)]
    seed: u64,

    /// Output path for the dataset artifact
    #[arg(short, long)]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let embeddings = WordEmbeddings::load_seeded(&cli.embeddings, cli.dim, cli.seed)?;

    let mut records: Vec<TweetRecord> = Vec::new();
    for path in &cli.corpus {
        records.extend(
            load_corpus(path, &cli.emotion)
                .with_context(|| format!("loading corpus {}", path.display()))?,
        );
    }

    let normalizer = Normalizer::new()?;
    let encoder = SequenceEncoder::new(cli.max_len);

    let mut has_emotion = Vec::new();
    let mut no_emotion = Vec::new();
    for record in &records {
        let normalized = normalizer.normalize(&record.text);
        let encoded = encoder.encode(&normalized, &embeddings.lexicon);
        if record.has_emotion {
            has_emotion.push(encoded);
        } else {
            no_emotion.push(encoded);
        }
    }
    info!(
        emotion = cli.emotion,
        has = has_emotion.len(),
        no = no_emotion.len(),
        "encoded corpus"
    );

    let split = split_dataset(has_emotion, no_emotion, cli.test_fraction);
    let artifact = DatasetArtifact::new(split, embeddings.table);
    artifact.save(&cli.output)?;

    Ok(())
}

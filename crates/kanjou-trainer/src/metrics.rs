//! Scalar metric logs for a training run.
//!
//! One writer per summary stream (train, test), appending
//! `step,loss,accuracy` rows at the reporting cadence.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Appends scalar metrics to a CSV file, flushed per row so a crashed run
/// still leaves a readable log behind.
pub struct MetricsWriter {
    out: BufWriter<File>,
}

impl MetricsWriter {
    /// Creates the metrics file at `path` and writes the header row.
    pub fn create(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let mut out = BufWriter::new(File::create(path)?);
        writeln!(out, "step,loss,accuracy")?;
        Ok(Self { out })
    }

    /// Records one scalar row.
    pub fn record(&mut self, step: usize, loss: f32, accuracy: f32) -> std::io::Result<()> {
        writeln!(self.out, "{step},{loss},{accuracy}")?;
        self.out.flush()
    }
}

//! # Corpus Loader
//!
//! Reads the tab-separated tweet corpus (header row, quoting disabled) and
//! selects the text column plus one binary emotion indicator column. Rows
//! with a missing value in either selected column are dropped before any
//! further processing.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, info};

use crate::error::{KanjouError, Result};

/// Header name of the tweet text column.
pub const TEXT_COLUMN: &str = "Tweet";

/// One raw tweet plus its binary indicator for the target emotion.
/// Created once from the corpus file; immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TweetRecord {
    pub text: String,
    pub has_emotion: bool,
}

/// Loads the corpus at `path`, selecting the indicator column named
/// `emotion`.
///
/// # Errors
///
/// A missing or unreadable file is fatal, as is a header row lacking the
/// text or emotion column.
pub fn load_corpus(path: impl AsRef<Path>, emotion: &str) -> Result<Vec<TweetRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| KanjouError::io(path, e))?;
    let records = parse_corpus(file, emotion)?;
    info!(
        path = %path.display(),
        rows = records.len(),
        emotion,
        "loaded corpus file"
    );
    Ok(records)
}

/// Reader-based variant of [`load_corpus`].
pub fn parse_corpus<R: Read>(reader: R, emotion: &str) -> Result<Vec<TweetRecord>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let text_col = column_index(&headers, TEXT_COLUMN)?;
    let emotion_col = column_index(&headers, emotion)?;

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for row in rdr.records() {
        let row = row?;
        let text = row.get(text_col).map(str::trim).unwrap_or_default();
        let label = row.get(emotion_col).map(str::trim).unwrap_or_default();
        let has_emotion = match label {
            "1" => true,
            "0" => false,
            _ => {
                dropped += 1;
                continue;
            }
        };
        if text.is_empty() {
            dropped += 1;
            continue;
        }
        records.push(TweetRecord {
            text: text.to_string(),
            has_emotion,
        });
    }
    if dropped > 0 {
        debug!(dropped, "dropped corpus rows with missing values");
    }
    Ok(records)
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| KanjouError::MissingColumn { name: name.into() })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORPUS: &str = "ID\tTweet\tanger\tjoy\n\
        1\tI am so angry\t1\t0\n\
        2\twhat a lovely day\t0\t1\n\
        3\tfurious right now\t1\t0\n";

    #[test]
    fn selects_text_and_indicator_columns() {
        let rows = parse_corpus(CORPUS.as_bytes(), "anger").unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].text, "I am so angry");
        assert!(rows[0].has_emotion);
        assert!(!rows[1].has_emotion);
        assert!(rows[2].has_emotion);
    }

    #[test]
    fn rows_with_missing_values_are_dropped() {
        let corpus = "ID\tTweet\tanger\n\
            1\tfine text\t1\n\
            2\t\t1\n\
            3\tno label\t\n\
            4\tbad label\tNONE\n\
            5\tkept\t0\n";
        let rows = parse_corpus(corpus.as_bytes(), "anger").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text, "fine text");
        assert_eq!(rows[1].text, "kept");
    }

    #[test]
    fn order_is_preserved() {
        let rows = parse_corpus(CORPUS.as_bytes(), "joy").unwrap();
        let texts: Vec<_> = rows.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(
            texts,
            ["I am so angry", "what a lovely day", "furious right now"]
        );
    }

    #[test]
    fn missing_column_is_fatal() {
        let err = parse_corpus(CORPUS.as_bytes(), "disgust").unwrap_err();
        assert!(matches!(err, KanjouError::MissingColumn { name } if name == "disgust"));
    }

    #[test]
    fn quotes_are_treated_literally() {
        let corpus = "Tweet\tanger\n\"quoted\" text\t1\n";
        let rows = parse_corpus(corpus.as_bytes(), "anger").unwrap();
        assert_eq!(rows[0].text, "\"quoted\" text");
    }
}

//! Errors raised while reading a treebank
//!
//! Every variant that points into the input carries the 1-based line number
//! of the offending line.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReadError>;

#[derive(Debug, Error)]
pub enum ReadError {
    /// The line source could not be opened
    #[error("Failed to open {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    /// The line source failed mid-read
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// HEAD column holds the `_` placeholder
    #[error("Missing HEAD at line {line}: {id} {form} {lemma} {upos}")]
    MalformedHead {
        line: usize,
        id: String,
        form: String,
        lemma: String,
        upos: String,
    },

    /// HEAD column is not an unsigned integer
    #[error("Invalid HEAD at line {line}: {value:?}")]
    InvalidHead { line: usize, value: String },

    /// HEAD points outside the sentence or at the token itself
    #[error("HEAD {head} at line {line} is not a valid governor in a sentence of {len} tokens")]
    HeadOutOfRange { line: usize, head: usize, len: usize },

    /// Structurally broken token line
    #[error("Format error at line {line}: {message}: {content:?}")]
    Format {
        line: usize,
        content: String,
        message: String,
    },
}

impl ReadError {
    /// Line number the error refers to, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            ReadError::Open { .. } | ReadError::Io(_) => None,
            ReadError::MalformedHead { line, .. }
            | ReadError::InvalidHead { line, .. }
            | ReadError::HeadOutOfRange { line, .. }
            | ReadError::Format { line, .. } => Some(*line),
        }
    }

    pub(crate) fn format(line: usize, content: &str, message: impl Into<String>) -> Self {
        ReadError::Format {
            line,
            content: content.to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_line() {
        let err = ReadError::format(7, "1\tdog", "Expected 9 or 10 fields, found 2");
        let msg = err.to_string();
        assert!(msg.contains("line 7"));
        assert!(msg.contains("found 2"));
        assert_eq!(err.line(), Some(7));
    }

    #[test]
    fn test_io_has_no_line() {
        let err: ReadError = io::Error::other("boom").into();
        assert_eq!(err.line(), None);
        assert!(err.to_string().contains("boom"));
    }
}

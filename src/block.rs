//! Sentence block assembly
//!
//! Pulls raw lines from a [`LineSource`] up to the next blank line and keeps
//! only the token rows, split into their tab-separated columns. Comments,
//! empty nodes (`8.1`) and, unless disabled, multiword ranges (`3-4`) are
//! dropped here so that row `i` of a block is token `i` of the sentence.

use crate::error::{ReadError, Result};
use crate::options::ReaderOptions;
use crate::source::LineSource;
use log::debug;
use memchr::memchr;

/// Columns in the short (no DEPS) and standard CoNLL-U layouts
const MIN_FIELDS: usize = 9;
const MAX_FIELDS: usize = 10;

/// One retained token line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based line number in the source
    pub line: usize,
    pub fields: Vec<String>,
}

impl Row {
    pub fn field(&self, idx: usize) -> &str {
        &self.fields[idx]
    }
}

/// Reads one sentence's token rows at a time
pub struct BlockReader<S: LineSource> {
    source: S,
    options: ReaderOptions,
}

impl<S: LineSource> BlockReader<S> {
    pub fn new(source: S, options: ReaderOptions) -> Self {
        Self { source, options }
    }

    pub fn options(&self) -> ReaderOptions {
        self.options
    }

    /// Token rows of the next sentence
    ///
    /// Blank lines before a sentence and comment-only blocks are skipped, so
    /// an empty result only ever means end-of-stream.
    pub fn next_block(&mut self) -> Result<Vec<Row>> {
        let mut rows = Vec::new();

        while let Some(line) = self.source.read_line()? {
            let line_num = self.source.line_num();
            // Tabs are column separators, so only other trailing whitespace goes
            let line = line.trim_end_matches(|c: char| c.is_whitespace() && c != '\t');

            if line.trim().is_empty() {
                if rows.is_empty() {
                    continue;
                }
                break;
            }

            if line.starts_with('#') {
                continue;
            }

            let Some(tab) = memchr(b'\t', line.as_bytes()) else {
                return Err(ReadError::format(line_num, line, "No tab-separated columns"));
            };
            let id = &line[..tab];
            if id.is_empty() {
                return Err(ReadError::format(line_num, line, "Empty ID"));
            }
            if self.is_skipped_id(id) {
                debug!("Skipping non-word row {} at line {}", id, line_num);
                continue;
            }

            let fields: Vec<String> = line.split('\t').map(str::to_string).collect();
            if !(MIN_FIELDS..=MAX_FIELDS).contains(&fields.len()) {
                return Err(ReadError::format(
                    line_num,
                    line,
                    format!(
                        "Expected {} or {} fields, found {}",
                        MIN_FIELDS,
                        MAX_FIELDS,
                        fields.len()
                    ),
                ));
            }

            rows.push(Row {
                line: line_num,
                fields,
            });
        }

        Ok(rows)
    }

    /// Empty nodes always; multiword ranges when configured
    fn is_skipped_id(&self, id: &str) -> bool {
        let id = id.as_bytes();
        memchr(b'.', id).is_some() || (self.options.skip_ranges && memchr(b'-', id).is_some())
    }

    pub fn line_num(&self) -> usize {
        self.source.line_num()
    }

    pub fn close(&mut self) {
        self.source.close();
    }

}

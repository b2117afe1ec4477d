//! Dependency instance producers
//!
//! [`DependencyReader`] is the one capability downstream code needs: hand
//! over the next sentence, or `None` once the input is exhausted.
//! [`ConllUReader`] implements it for CoNLL-U.

use crate::block::BlockReader;
use crate::error::Result;
use crate::instance::{DependencyInstance, build_instance};
use crate::options::ReaderOptions;
use crate::source::{FileSource, LineSource, TextSource};
use std::iter::FusedIterator;
use std::path::Path;

/// Something that yields dependency instances one sentence at a time
pub trait DependencyReader {
    /// Read and build the next sentence, `Ok(None)` at end-of-stream
    fn next_instance(&mut self) -> Result<Option<DependencyInstance>>;

    /// Release the input. Later calls to `next_instance` return `Ok(None)`.
    fn close(&mut self);

    /// Consume the reader as an iterator that stops after the first error
    fn instances(self) -> Instances<Self>
    where
        Self: Sized,
    {
        Instances {
            reader: self,
            done: false,
        }
    }
}

impl<R: DependencyReader + ?Sized> DependencyReader for Box<R> {
    fn next_instance(&mut self) -> Result<Option<DependencyInstance>> {
        (**self).next_instance()
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// Treebank formats with a reader implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyFormat {
    ConllU,
}

/// Open `path` with the reader for `format`
pub fn open_reader(
    format: DependencyFormat,
    path: impl AsRef<Path>,
    options: ReaderOptions,
) -> Result<Box<dyn DependencyReader>> {
    match format {
        DependencyFormat::ConllU => Ok(Box::new(ConllUReader::open_with(path, options)?)),
    }
}

/// CoNLL-U reader
///
/// Columns consumed: FORM, LEMMA, UPOS (as both coarse and fine POS),
/// FEATS, HEAD and DEPREL. XPOS and everything after DEPREL are ignored.
pub struct ConllUReader<S: LineSource> {
    blocks: BlockReader<S>,
}

impl ConllUReader<FileSource> {
    /// Open a file (plain or `.gz`) with default options
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, ReaderOptions::default())
    }

    pub fn open_with(path: impl AsRef<Path>, options: ReaderOptions) -> Result<Self> {
        Ok(Self::with_source(FileSource::open(path)?, options))
    }
}

impl ConllUReader<TextSource> {
    /// Read from an in-memory string with default options
    pub fn from_text(text: &str) -> Self {
        Self::with_source(TextSource::from_text(text), ReaderOptions::default())
    }
}

impl<S: LineSource> ConllUReader<S> {
    pub fn with_source(source: S, options: ReaderOptions) -> Self {
        Self {
            blocks: BlockReader::new(source, options),
        }
    }

    /// Line number of the last line consumed
    pub fn line_num(&self) -> usize {
        self.blocks.line_num()
    }
}

impl<S: LineSource> DependencyReader for ConllUReader<S> {
    fn next_instance(&mut self) -> Result<Option<DependencyInstance>> {
        let rows = self.blocks.next_block()?;
        build_instance(&rows, self.blocks.options())
    }

    fn close(&mut self) {
        self.blocks.close();
    }
}

/// Iterator over the instances of a [`DependencyReader`]
pub struct Instances<R> {
    reader: R,
    done: bool,
}

impl<R: DependencyReader> Iterator for Instances<R> {
    type Item = Result<DependencyInstance>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.next_instance() {
            Ok(Some(instance)) => Some(Ok(instance)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: DependencyReader> FusedIterator for Instances<R> {}

//! Line-oriented input
//!
//! A [`LineSource`] hands out one raw line at a time and can be closed early.
//! Files ending in `.gz` are decompressed on the fly.

use crate::error::{ReadError, Result};
use bstr::ByteSlice;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::Path;

/// Sequential read-only access to a line-oriented text stream
pub trait LineSource {
    /// Next line without its terminator, or `None` at end-of-stream
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// 1-based number of the line most recently returned (0 before the first)
    fn line_num(&self) -> usize;

    /// Release the underlying resource. Safe to call repeatedly; reads after
    /// closing report end-of-stream.
    fn close(&mut self);
}

/// [`LineSource`] over any buffered reader
pub struct BufSource<R: BufRead> {
    inner: Option<R>,
    buf: Vec<u8>,
    line_num: usize,
}

/// Source backed by a (possibly gzipped) file
pub type FileSource = BufSource<Box<dyn BufRead>>;

/// Source backed by an in-memory string
pub type TextSource = BufSource<Cursor<String>>;

impl<R: BufRead> BufSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            inner: Some(reader),
            buf: Vec::new(),
            line_num: 0,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }
}

impl FileSource {
    /// Open a file, decompressing it if the name ends in `.gz`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ReadError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let reader: Box<dyn BufRead> = if path.extension().is_some_and(|ext| ext == "gz") {
            Box::new(BufReader::new(MultiGzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };
        Ok(Self::new(reader))
    }
}

impl TextSource {
    pub fn from_text(text: &str) -> Self {
        Self::new(Cursor::new(text.to_string()))
    }
}

impl<R: BufRead> LineSource for BufSource<R> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let Some(reader) = self.inner.as_mut() else {
            return Ok(None);
        };

        self.buf.clear();
        if reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line_num += 1;

        let line = self.buf.strip_suffix(b"\n").unwrap_or(&self.buf);
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        let text = line
            .to_str()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(Some(text.to_string()))
    }

    fn line_num(&self) -> usize {
        self.line_num
    }

    fn close(&mut self) {
        self.inner = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;
    use tempfile::tempdir;

    fn drain(source: &mut impl LineSource) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = source.read_line().unwrap() {
            lines.push(line);
        }
        lines
    }

    #[test]
    fn test_text_lines() {
        let mut source = TextSource::from_text("a\tb\n\nc\n");
        assert_eq!(drain(&mut source), vec!["a\tb", "", "c"]);
        assert_eq!(source.line_num(), 3);
        // Stays exhausted
        assert_eq!(source.read_line().unwrap(), None);
    }

    #[test]
    fn test_missing_final_newline_and_crlf() {
        let mut source = TextSource::from_text("one\r\ntwo");
        assert_eq!(drain(&mut source), vec!["one", "two"]);
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut source = TextSource::from_text("one\ntwo\n");
        assert_eq!(source.read_line().unwrap().as_deref(), Some("one"));
        source.close();
        source.close();
        assert!(source.is_closed());
        assert_eq!(source.read_line().unwrap(), None);
    }

    #[test]
    fn test_invalid_utf8() {
        let mut source = BufSource::new(Cursor::new(vec![b'o', b'k', b'\n', 0xff, b'\n']));
        assert_eq!(source.read_line().unwrap().as_deref(), Some("ok"));
        let err = source.read_line().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.conllu");
        match FileSource::open(&path) {
            Err(ReadError::Open { path: p, .. }) => assert_eq!(p, path),
            Err(e) => panic!("unexpected error: {e}"),
            Ok(_) => panic!("opened a missing file"),
        }
    }

    #[test]
    fn test_open_plain_and_gzip() {
        let dir = tempdir().unwrap();
        let text = "# c\n1\tx\n\n";

        let plain = dir.path().join("t.conllu");
        std::fs::write(&plain, text).unwrap();

        let gz = dir.path().join("t.conllu.gz");
        let mut enc = GzEncoder::new(File::create(&gz).unwrap(), Compression::default());
        enc.write_all(text.as_bytes()).unwrap();
        enc.finish().unwrap();

        let plain_lines = drain(&mut FileSource::open(&plain).unwrap());
        let gz_lines = drain(&mut FileSource::open(&gz).unwrap());
        assert_eq!(plain_lines, vec!["# c", "1\tx", ""]);
        assert_eq!(plain_lines, gz_lines);
    }
}

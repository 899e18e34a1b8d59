//! Raw input lines and the sources that produce them.

use std::io::BufRead;

use crate::encoding::TextEncoding;
use crate::error::{SplitError, SplitResult};
use crate::marker::Marker;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// One raw line, terminator included, with its size in the active encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    text: String,
    byte_len: usize,
}

impl Line {
    pub fn new(text: String, byte_len: usize) -> Self {
        Self { text, byte_len }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    pub fn marker(&self) -> Option<Marker> {
        Marker::classify(&self.text)
    }
}

impl From<String> for Line {
    fn from(text: String) -> Self {
        let byte_len = text.len();
        Self { text, byte_len }
    }
}

impl From<&str> for Line {
    fn from(text: &str) -> Self {
        Line::from(text.to_string())
    }
}

/// Split in-memory text into lines, keeping each terminator. A leading byte
/// order mark is dropped.
pub fn lines_from_str(text: &str) -> impl Iterator<Item = SplitResult<Line>> + '_ {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    text.split_inclusive('\n').map(|line| Ok(Line::from(line)))
}

/// Lazily decodes lines from a buffered reader.
///
/// Lines end at `\n`; a `\r` before it stays part of the line. A UTF-8 byte
/// order mark at the very start of the input is dropped. The reader stops
/// after the first error.
pub struct LineReader<R> {
    reader: R,
    encoding: TextEncoding,
    buf: Vec<u8>,
    line_no: usize,
    done: bool,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R, encoding: TextEncoding) -> Self {
        Self {
            reader,
            encoding,
            buf: Vec::new(),
            line_no: 0,
            done: false,
        }
    }

    fn read_line(&mut self) -> SplitResult<Option<Line>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line_no += 1;

        let mut bytes = self.buf.as_slice();
        if self.line_no == 1 && self.encoding.is_utf8() {
            bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        }

        let text = self.encoding.decode(bytes).ok_or(SplitError::Encoding {
            line: self.line_no,
            encoding: self.encoding.name(),
        })?;

        Ok(Some(Line::new(text.into_owned(), bytes.len())))
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = SplitResult<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.read_line();
        if !matches!(result, Ok(Some(_))) {
            self.done = true;
        }
        result.transpose()
    }
}

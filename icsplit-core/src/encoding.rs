//! Text encodings for calendar input and output.

use std::borrow::Cow;

use encoding_rs::Encoding;

use crate::error::{SplitError, SplitResult};

/// An ASCII-compatible text encoding resolved from a WHATWG label.
///
/// Encodings that are not ASCII-compatible (UTF-16, ISO-2022-JP) are
/// rejected: the splitter finds line ends and markers byte-wise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEncoding(&'static Encoding);

impl TextEncoding {
    pub fn utf8() -> Self {
        TextEncoding(encoding_rs::UTF_8)
    }

    /// Resolve a label such as `utf-8`, `utf8`, `latin1` or `windows-1252`.
    pub fn for_label(label: &str) -> SplitResult<Self> {
        let encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| SplitError::UnsupportedEncoding(label.to_string()))?;

        if !encoding.is_ascii_compatible() || encoding.output_encoding() != encoding {
            return Err(SplitError::UnsupportedEncoding(format!(
                "{label} (only ASCII-compatible encodings are supported)"
            )));
        }

        Ok(TextEncoding(encoding))
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    pub fn is_utf8(&self) -> bool {
        self.0 == encoding_rs::UTF_8
    }

    /// Strict decode: `None` if any byte sequence is invalid.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        self.0.decode_without_bom_handling_and_without_replacement(bytes)
    }

    pub fn encode<'a>(&self, text: &'a str) -> Cow<'a, [u8]> {
        let (bytes, _, _) = self.0.encode(text);
        bytes
    }

    /// Size of `text` once encoded.
    pub fn encoded_len(&self, text: &str) -> usize {
        if self.is_utf8() {
            text.len()
        } else {
            self.encode(text).len()
        }
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self::utf8()
    }
}

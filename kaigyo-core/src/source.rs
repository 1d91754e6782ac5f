//! Character sources consumed by the line reader

use std::io;

/// A bulk producer of decoded characters, the decoding-side analogue of
/// [`std::io::Read`].
///
/// Implementations must not return `Ok(0)` while more characters can still
/// be produced: a zero return signals end of stream (or an empty `buf`).
/// A source that decodes from byte chunks is expected to keep pulling
/// chunks internally until it can hand over at least one character.
pub trait CharSource {
    /// Fill `buf` with the next characters of the stream, returning how
    /// many were written.
    fn read_chars(&mut self, buf: &mut [char]) -> io::Result<usize>;
}

/// A [`CharSource`] over an in-memory string, used for tests and for
/// feeding already-decoded text through a [`LineReader`].
///
/// [`LineReader`]: crate::reader::LineReader
#[derive(Debug, Clone)]
pub struct TextSource {
    text: String,
    pos: usize,
}

impl TextSource {
    /// Create a source over the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pos: 0,
        }
    }
}

impl From<&str> for TextSource {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for TextSource {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl CharSource for TextSource {
    fn read_chars(&mut self, buf: &mut [char]) -> io::Result<usize> {
        let mut written = 0;
        for c in self.text[self.pos..].chars() {
            if written == buf.len() {
                break;
            }
            buf[written] = c;
            written += 1;
            self.pos += c.len_utf8();
        }
        Ok(written)
    }
}

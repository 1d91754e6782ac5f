//! Line decoding session over a chunked byte source
//!
//! Binds a [`LineReader`] to successive segments of a [`ChunkSource`]:
//! bytes are decoded with the configured charset (malformed input becomes
//! U+FFFD), an optional UTF-8 byte-order mark is skipped at the start of
//! each segment, and lines are handed out one at a time.

use crate::charset;
use crate::chunk::ChunkSource;
use crate::config::DecoderConfig;
use crate::error::Result;
use encoding_rs::{Decoder, Encoding, UTF_8};
use kaigyo_core::{CharSource, LineReader};
use log::{debug, trace};
use std::io;

const BOM: char = '\u{feff}';

/// [`CharSource`] that decodes the byte chunks of the current segment.
struct DecodedChars<S> {
    source: S,
    encoding: &'static Encoding,
    decoder: Decoder,
    decoded: String,
    pos: usize,
    /// The decoder state has been flushed for the current segment; reads
    /// return end-of-stream until the next segment advance.
    segment_done: bool,
    /// Skip a single leading U+FEFF of the current segment (UTF-8 only).
    strip_bom: bool,
}

impl<S: ChunkSource> DecodedChars<S> {
    fn new(source: S, encoding: &'static Encoding) -> Self {
        Self {
            source,
            encoding,
            decoder: encoding.new_decoder_without_bom_handling(),
            decoded: String::new(),
            pos: 0,
            segment_done: false,
            strip_bom: false,
        }
    }

    fn next_segment(&mut self) -> bool {
        let has = self.source.next_segment();
        if has {
            self.decoder = self.encoding.new_decoder_without_bom_handling();
            self.decoded.clear();
            self.pos = 0;
            self.segment_done = false;
            self.strip_bom = self.encoding == UTF_8;
        }
        has
    }
}

impl<S: ChunkSource> CharSource for DecodedChars<S> {
    fn read_chars(&mut self, buf: &mut [char]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            if self.pos < self.decoded.len() {
                if self.strip_bom {
                    self.strip_bom = false;
                    if self.decoded[self.pos..].starts_with(BOM) {
                        self.pos += BOM.len_utf8();
                        continue;
                    }
                }
                let mut written = 0;
                for c in self.decoded[self.pos..].chars() {
                    if written == buf.len() {
                        break;
                    }
                    buf[written] = c;
                    written += 1;
                    self.pos += c.len_utf8();
                }
                return Ok(written);
            }

            // Decoded text exhausted; pull the next chunk.
            self.decoded.clear();
            self.pos = 0;
            if self.segment_done {
                return Ok(0);
            }
            match self.source.next_chunk()? {
                Some(chunk) => {
                    charset::decode_append(&mut self.decoder, &chunk, &mut self.decoded, false);
                }
                None => {
                    // A dangling partial sequence at segment end becomes a
                    // replacement character.
                    charset::decode_append(&mut self.decoder, &[], &mut self.decoded, true);
                    self.segment_done = true;
                }
            }
        }
    }
}

/// Decodes a chunked byte source into an iteration of lines.
///
/// Call [`next_file`](Self::next_file) to bind the decoder to the first
/// (and each following) segment, then [`poll`](Self::poll) until it
/// returns `None`. The `Iterator` impl is a forward-only, single-pass view
/// over `poll`.
pub struct LineDecoder<S: ChunkSource> {
    reader: LineReader<DecodedChars<S>>,
    peeked: Option<String>,
}

impl<S: ChunkSource> LineDecoder<S> {
    /// Create a decoding session over `source`.
    ///
    /// Fails if the configured charset label is unknown.
    pub fn new(source: S, config: &DecoderConfig) -> Result<Self> {
        let encoding = charset::lookup(&config.charset)?;
        debug!(
            "line decoder: charset={} delimiter={:?}",
            encoding.name(),
            config.line_delimiter
        );
        Ok(Self {
            reader: LineReader::new(DecodedChars::new(source, encoding), config.line_delimiter),
            peeked: None,
        })
    }

    /// Advance to the next segment of the underlying source.
    ///
    /// Returns `true` if another segment was available. For UTF-8 input a
    /// single leading byte-order mark of the new segment is skipped.
    pub fn next_file(&mut self) -> bool {
        let has = self.reader.get_mut().next_segment();
        if has {
            trace!("advanced to next input segment");
        }
        has
    }

    /// The next logical line of the current segment, or `None` at segment
    /// end.
    pub fn poll(&mut self) -> Result<Option<String>> {
        if let Some(line) = self.peeked.take() {
            return Ok(Some(line));
        }
        Ok(self.reader.read_line()?)
    }

    /// Whether another line is available, buffering it if so.
    pub fn has_next(&mut self) -> Result<bool> {
        if self.peeked.is_none() {
            self.peeked = self.reader.read_line()?;
        }
        Ok(self.peeked.is_some())
    }

    /// The next line without consuming it, or `None` at segment end.
    pub fn peek(&mut self) -> Result<Option<&str>> {
        if self.peeked.is_none() {
            self.peeked = self.reader.read_line()?;
        }
        Ok(self.peeked.as_deref())
    }

    /// Release the session deterministically.
    ///
    /// Consumes the decoder (dropping the reader, the decoder state, and
    /// the underlying source), so a second close is unrepresentable.
    pub fn close(self) {
        drop(self);
    }
}

impl<S: ChunkSource> Iterator for LineDecoder<S> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.poll().transpose()
    }
}

//! Line encoding session over a chunked byte sink
//!
//! Accepts lines and raw text fragments, joins lines with the configured
//! newline, buffers text, and hands it to the sink as encoded chunks.
//! Unmappable characters are replaced by the encoder, never failing a
//! write.

use crate::charset;
use crate::chunk::ChunkSink;
use crate::config::EncoderConfig;
use crate::error::Result;
use encoding_rs::Encoder;
use log::{debug, trace};

/// Buffered text is encoded and flushed to the sink once it reaches this
/// many bytes.
const FLUSH_THRESHOLD: usize = 32 * 1024;

struct EncodeWriter {
    encoder: Encoder,
    newline: &'static str,
    text: String,
}

/// Encodes lines into a chunked byte sink.
///
/// The writer state lives until [`finish`](Self::finish); any write after
/// that is a programming error and panics. [`close`](Self::close) consumes
/// the session, so closing twice is unrepresentable.
pub struct LineEncoder<K: ChunkSink> {
    sink: K,
    writer: Option<EncodeWriter>,
}

impl<K: ChunkSink> LineEncoder<K> {
    /// Create an encoding session over `sink`.
    ///
    /// Fails if the configured charset label is unknown. Per the Encoding
    /// Standard the encoder uses the charset's output encoding (UTF-16
    /// maps to UTF-8 on the encode side).
    pub fn new(sink: K, config: &EncoderConfig) -> Result<Self> {
        let encoding = charset::lookup(&config.charset)?;
        debug!(
            "line encoder: charset={} newline={:?}",
            encoding.name(),
            config.newline
        );
        Ok(Self {
            sink,
            writer: Some(EncodeWriter {
                encoder: encoding.new_encoder(),
                newline: config.newline.as_str(),
                text: String::with_capacity(FLUSH_THRESHOLD),
            }),
        })
    }

    /// Append a line followed by the configured newline.
    pub fn add_line(&mut self, line: &str) -> Result<()> {
        self.add_text(line)?;
        self.add_newline()
    }

    /// Append a raw text fragment without a terminator.
    pub fn add_text(&mut self, text: &str) -> Result<()> {
        let writer = Self::expect_writer(&mut self.writer);
        writer.text.push_str(text);
        if writer.text.len() >= FLUSH_THRESHOLD {
            self.flush_encoded(false)?;
        }
        Ok(())
    }

    /// Append the configured newline alone.
    pub fn add_newline(&mut self) -> Result<()> {
        let newline = Self::expect_writer(&mut self.writer).newline;
        self.add_text(newline)
    }

    /// Flush buffered output and open the next segment of the sink.
    ///
    /// The encoder state persists across the segment boundary.
    pub fn next_file(&mut self) -> Result<()> {
        self.flush_encoded(false)?;
        trace!("advanced to next output segment");
        self.sink.next_segment()?;
        Ok(())
    }

    /// Flush remaining output, finalize the encoder, and signal `finish`
    /// to the sink. Calling `finish` again is a no-op.
    pub fn finish(&mut self) -> Result<()> {
        if self.writer.is_some() {
            self.flush_encoded(true)?;
            self.writer = None;
            self.sink.finish()?;
        }
        Ok(())
    }

    /// Finish if still open, then close the sink.
    pub fn close(mut self) -> Result<()> {
        self.finish()?;
        self.sink.close();
        Ok(())
    }

    /// Consume the session, returning the sink. The session must already
    /// be finished; buffered unflushed text would otherwise be lost.
    pub fn into_inner(self) -> K {
        self.sink
    }

    /// Shared access to the underlying sink.
    pub fn get_ref(&self) -> &K {
        &self.sink
    }

    fn flush_encoded(&mut self, last: bool) -> Result<()> {
        let writer = Self::expect_writer(&mut self.writer);
        if writer.text.is_empty() && !last {
            return Ok(());
        }
        let mut encoded = Vec::with_capacity(writer.text.len() + 16);
        charset::encode_append(&mut writer.encoder, &writer.text, &mut encoded, last);
        writer.text.clear();
        if !encoded.is_empty() {
            trace!("flushing {} encoded bytes", encoded.len());
            self.sink.add_chunk(&encoded)?;
        }
        Ok(())
    }

    fn expect_writer(writer: &mut Option<EncodeWriter>) -> &mut EncodeWriter {
        writer.as_mut().expect("line encoder used after finish")
    }
}

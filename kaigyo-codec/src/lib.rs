//! Line-oriented text decoding and encoding over chunked byte sources
//!
//! This crate composes the line reader from `kaigyo-core` with charset
//! transcoding and an abstract chunked byte source/sink: bytes are decoded
//! to characters (malformed input replaced, never failing), split into
//! logical lines by a selectable delimiter policy, and on the way out lines
//! are joined with a configured newline, encoded, and handed to the sink in
//! buffered chunks.

#![warn(missing_docs)]

pub mod charset;
pub mod chunk;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;

// Re-export key types
pub use chunk::{ChunkSink, ChunkSource, VecChunkSink, VecChunkSource};
pub use config::{CodecConfig, CodecConfigBuilder, DecoderConfig, EncoderConfig};
pub use decoder::LineDecoder;
pub use encoder::LineEncoder;
pub use error::{CodecError, Result};

// Re-export from core for convenience
pub use kaigyo_core::{LineDelimiter, Newline};

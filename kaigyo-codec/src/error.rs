//! Error types for the codec session layer

use thiserror::Error;

/// Errors surfaced by the decoding and encoding sessions.
///
/// Malformed or unmappable character data is never an error: it is
/// replaced per the charset's replacement policy. Use of a session after
/// `finish` is a programming error and panics instead of returning a
/// variant here.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Unexpected failure of the underlying byte source or sink. Never
    /// retried at this layer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configured charset label does not resolve to a known encoding.
    #[error("charset '{label}' is not supported")]
    UnsupportedCharset {
        /// The label that failed to resolve.
        label: String,
    },

    /// Invalid configuration document.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

//! Configuration surface for the codec sessions
//!
//! One environment-independent document covers both directions:
//!
//! ```toml
//! charset = "utf-8"        # any encoding label, default "utf-8"
//! newline = "CRLF"         # CRLF | LF | CR, default CRLF
//! line_delimiter = "LF"    # CR | LF | CRLF; absent = generic recognition
//! ```

use crate::charset;
use crate::error::{CodecError, Result};
use kaigyo_core::{LineDelimiter, Newline};
use serde::Deserialize;

/// Default charset label.
pub const DEFAULT_CHARSET: &str = "utf-8";

fn default_charset() -> String {
    DEFAULT_CHARSET.to_string()
}

/// Combined configuration for decoding and encoding sessions.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Charset label for both directions.
    pub charset: String,
    /// Newline written after each output line.
    pub newline: Newline,
    /// Input delimiter recognition mode; `None` is the generic rule.
    pub line_delimiter: Option<LineDelimiter>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            charset: default_charset(),
            newline: Newline::default(),
            line_delimiter: None,
        }
    }
}

impl CodecConfig {
    /// Create a builder.
    pub fn builder() -> CodecConfigBuilder {
        CodecConfigBuilder::default()
    }

    /// Parse a TOML configuration document.
    ///
    /// Unknown keys and unresolvable charset labels are rejected.
    pub fn from_toml_str(doc: &str) -> Result<Self> {
        let config: Self = toml::from_str(doc).map_err(|e| CodecError::Config(e.to_string()))?;
        charset::lookup(&config.charset)?;
        Ok(config)
    }

    /// The decoding-side view of this configuration.
    pub fn decoder(&self) -> DecoderConfig {
        DecoderConfig {
            charset: self.charset.clone(),
            line_delimiter: self.line_delimiter,
        }
    }

    /// The encoding-side view of this configuration.
    pub fn encoder(&self) -> EncoderConfig {
        EncoderConfig {
            charset: self.charset.clone(),
            newline: self.newline,
        }
    }
}

/// Configuration builder.
#[derive(Debug, Default)]
pub struct CodecConfigBuilder {
    config: CodecConfig,
}

impl CodecConfigBuilder {
    /// Set the charset label.
    pub fn charset(mut self, label: impl Into<String>) -> Self {
        self.config.charset = label.into();
        self
    }

    /// Set the output newline.
    pub fn newline(mut self, newline: Newline) -> Self {
        self.config.newline = newline;
        self
    }

    /// Set an explicit input delimiter recognition mode.
    pub fn line_delimiter(mut self, delimiter: LineDelimiter) -> Self {
        self.config.line_delimiter = Some(delimiter);
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<CodecConfig> {
        charset::lookup(&self.config.charset)?;
        Ok(self.config)
    }
}

/// Configuration consumed by [`LineDecoder`].
///
/// [`LineDecoder`]: crate::decoder::LineDecoder
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Charset label for decoding input bytes.
    pub charset: String,
    /// Input delimiter recognition mode; `None` is the generic rule.
    pub line_delimiter: Option<LineDelimiter>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            charset: default_charset(),
            line_delimiter: None,
        }
    }
}

/// Configuration consumed by [`LineEncoder`].
///
/// [`LineEncoder`]: crate::encoder::LineEncoder
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Charset label for encoding output text.
    pub charset: String,
    /// Newline written after each line.
    pub newline: Newline,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            charset: default_charset(),
            newline: Newline::default(),
        }
    }
}

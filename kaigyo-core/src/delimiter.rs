//! Line delimiter recognition and output newline selection

use serde::{Deserialize, Serialize};

/// Which character sequence terminates a line when reading.
///
/// Chosen once per reader instance. The "generic" recognition mode (any of
/// CR, LF, CRLF treated uniformly) is expressed as `Option<LineDelimiter>`
/// being `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LineDelimiter {
    /// Split on bare `\r` only; `\r\n` pairs are ordinary content.
    Cr,
    /// Split on `\n` not preceded by `\r`.
    Lf,
    /// Split on `\r\n` pairs only; bare `\r` and bare `\n` are content.
    Crlf,
}

impl LineDelimiter {
    /// The literal delimiter sequence this mode splits on.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineDelimiter::Cr => "\r",
            LineDelimiter::Lf => "\n",
            LineDelimiter::Crlf => "\r\n",
        }
    }
}

/// The newline string appended after each line when writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Newline {
    /// `\r\n`
    #[default]
    Crlf,
    /// `\n`
    Lf,
    /// `\r`
    Cr,
}

impl Newline {
    /// The terminator string written after each line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Newline::Crlf => "\r\n",
            Newline::Lf => "\n",
            Newline::Cr => "\r",
        }
    }

    /// The recognition mode that splits exactly on this newline.
    pub fn as_line_delimiter(&self) -> LineDelimiter {
        match self {
            Newline::Crlf => LineDelimiter::Crlf,
            Newline::Lf => LineDelimiter::Lf,
            Newline::Cr => LineDelimiter::Cr,
        }
    }
}

//! Delimiter-aware line splitting over character streams
//!
//! This crate provides the line-splitting state machine: a delimiter
//! recognition policy, an output newline selection, and a buffered reader
//! that turns a character stream into logical lines.

#![warn(missing_docs)]

pub mod delimiter;
pub mod reader;
pub mod source;

// Re-export key types
pub use delimiter::{LineDelimiter, Newline};
pub use reader::LineReader;
pub use source::{CharSource, TextSource};

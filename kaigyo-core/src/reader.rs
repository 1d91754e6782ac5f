//! Buffered line reading with a selectable delimiter recognition mode
//!
//! The reader maintains a fixed-capacity character buffer refilled in bulk
//! from a [`CharSource`] and scans it one character at a time, tracking the
//! previously seen character so that delimiters spanning a refill boundary
//! are still recognized. CR mode needs one character of lookahead to tell a
//! bare `\r` from a `\r\n` pair; the lookahead is held in a one-slot
//! pushback so it is still delivered by the next scan step.

use crate::delimiter::LineDelimiter;
use crate::source::CharSource;
use std::io;

/// Default character buffer capacity.
pub const DEFAULT_CAPACITY: usize = 256;

/// A buffered reader that splits a character stream into logical lines.
///
/// With `Some(delimiter)` only that delimiter terminates lines, with the
/// tie-breaks documented on [`LineDelimiter`]. With `None` the generic rule
/// applies: CR, LF, and CRLF all terminate, CRLF consumed as a single
/// terminator.
///
/// Not thread-safe; one instance per owner.
pub struct LineReader<S> {
    source: S,
    delimiter: Option<LineDelimiter>,
    buf: Box<[char]>,
    /// `None` means the buffer needs a refill; `Some(i)` means
    /// `buf[i..valid]` is unread.
    cursor: Option<usize>,
    valid: usize,
    /// Holds a lookahead character pulled from the source past the buffered
    /// region, so it is re-delivered on the next refill.
    pushback: Option<char>,
    /// Generic mode only: a line was terminated by `\r` at the very end of
    /// the stream's available data, so an immediately following `\n` (for
    /// example at the start of the next segment) belongs to that terminator.
    skip_lf: bool,
}

impl<S: CharSource> LineReader<S> {
    /// Create a reader with the default buffer capacity.
    pub fn new(source: S, delimiter: Option<LineDelimiter>) -> Self {
        Self::with_capacity(source, delimiter, DEFAULT_CAPACITY)
    }

    /// Create a reader with an explicit buffer capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(source: S, delimiter: Option<LineDelimiter>, capacity: usize) -> Self {
        assert!(capacity > 0, "line reader capacity must be non-zero");
        Self {
            source,
            delimiter,
            buf: vec!['\0'; capacity].into_boxed_slice(),
            cursor: None,
            valid: 0,
            pushback: None,
            skip_lf: false,
        }
    }

    /// The recognition mode this reader was created with.
    pub fn delimiter(&self) -> Option<LineDelimiter> {
        self.delimiter
    }

    /// Read the next logical line, without its terminator.
    ///
    /// Returns `Ok(None)` at end of stream. An empty source yields zero
    /// lines; a partial line at end of stream is returned as the final
    /// line. I/O errors from the source are propagated without retry.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        match self.delimiter {
            Some(delimiter) => self.read_delimited(delimiter),
            None => self.read_any(),
        }
    }

    /// Shared access to the underlying source.
    pub fn get_ref(&self) -> &S {
        &self.source
    }

    /// Mutable access to the underlying source.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Consume the reader, returning the underlying source.
    pub fn into_inner(self) -> S {
        self.source
    }

    fn read_delimited(&mut self, delimiter: LineDelimiter) -> io::Result<Option<String>> {
        let mut line: Option<String> = None;
        let mut prev = '\0';

        'refill: loop {
            if self.cursor.is_none() {
                let filled = self.refill()?;
                if filled == 0 {
                    break;
                }
                self.valid = filled;
                self.cursor = Some(0);
            }
            let acc = line.get_or_insert_with(String::new);
            let mut i = self.cursor.unwrap_or(0);
            while i < self.valid {
                let c = self.buf[i];
                let eol = match delimiter {
                    LineDelimiter::Cr => c == '\r' && self.peek_beyond(i)? != Some('\n'),
                    LineDelimiter::Lf => prev != '\r' && c == '\n',
                    LineDelimiter::Crlf => {
                        if prev == '\r' && c == '\n' {
                            // The CR was appended as content; take it back.
                            acc.pop();
                            true
                        } else {
                            false
                        }
                    }
                };
                i += 1;
                self.cursor = Some(i);
                if eol {
                    break 'refill;
                }
                acc.push(c);
                prev = c;
            }
            self.cursor = None;
        }

        Ok(line)
    }

    /// Generic recognition: CR, LF, and CRLF all terminate; CRLF is
    /// consumed as one terminator; a trailing terminator produces no extra
    /// empty line.
    fn read_any(&mut self) -> io::Result<Option<String>> {
        let mut line: Option<String> = None;

        loop {
            if self.cursor.is_none() {
                let filled = self.refill()?;
                if filled == 0 {
                    return Ok(line);
                }
                self.valid = filled;
                let mut start = 0;
                if self.skip_lf {
                    self.skip_lf = false;
                    if self.buf[0] == '\n' {
                        start = 1;
                    }
                }
                self.cursor = Some(start);
            }
            let mut i = self.cursor.unwrap_or(0);
            while i < self.valid {
                let c = self.buf[i];
                i += 1;
                match c {
                    '\n' => {
                        self.cursor = Some(i);
                        return Ok(Some(line.unwrap_or_default()));
                    }
                    '\r' => {
                        if i < self.valid {
                            if self.buf[i] == '\n' {
                                i += 1;
                            }
                        } else {
                            // The possible LF half of the pair is beyond
                            // the buffered region.
                            let mut one = ['\0'];
                            if self.source.read_chars(&mut one)? == 0 {
                                self.skip_lf = true;
                            } else if one[0] != '\n' {
                                self.pushback = Some(one[0]);
                            }
                        }
                        self.cursor = Some(i);
                        return Ok(Some(line.unwrap_or_default()));
                    }
                    _ => line.get_or_insert_with(String::new).push(c),
                }
            }
            self.cursor = None;
        }
    }

    /// Refill the buffer, delivering a pushed-back lookahead character
    /// first. Returns the number of valid characters; zero at end of
    /// stream.
    fn refill(&mut self) -> io::Result<usize> {
        let mut filled = 0;
        if let Some(c) = self.pushback.take() {
            self.buf[0] = c;
            filled = 1;
        }
        filled += self.source.read_chars(&mut self.buf[filled..])?;
        Ok(filled)
    }

    /// One-character lookahead past position `i`, from the buffer when
    /// available, otherwise from the source via the pushback slot so the
    /// character is not lost.
    fn peek_beyond(&mut self, i: usize) -> io::Result<Option<char>> {
        if i + 1 < self.valid {
            return Ok(Some(self.buf[i + 1]));
        }
        if let Some(c) = self.pushback {
            return Ok(Some(c));
        }
        let mut one = ['\0'];
        if self.source.read_chars(&mut one)? == 0 {
            return Ok(None);
        }
        self.pushback = Some(one[0]);
        Ok(Some(one[0]))
    }
}

impl<S> std::fmt::Debug for LineReader<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineReader")
            .field("delimiter", &self.delimiter)
            .field("capacity", &self.buf.len())
            .field("cursor", &self.cursor)
            .field("valid", &self.valid)
            .finish_non_exhaustive()
    }
}

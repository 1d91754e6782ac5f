//! Chunked byte source and sink abstractions
//!
//! A segment is one unit of the underlying source/sink, corresponding to
//! one logical file. The traits here are the narrow seam to the external
//! transport; the in-memory implementations back the tests and small
//! embeddings.

use std::collections::VecDeque;
use std::io;

/// A supplier of byte chunks grouped into segments.
pub trait ChunkSource {
    /// Advance to the next segment. Returns `false` when no segment
    /// remains. Must be called before the first chunk is requested.
    fn next_segment(&mut self) -> bool;

    /// The next byte chunk of the current segment, or `None` when the
    /// segment is exhausted.
    fn next_chunk(&mut self) -> io::Result<Option<Vec<u8>>>;
}

/// A consumer of byte chunks grouped into segments.
pub trait ChunkSink {
    /// Append a chunk to the current segment.
    fn add_chunk(&mut self, chunk: &[u8]) -> io::Result<()>;

    /// Close the current segment and open the next one.
    fn next_segment(&mut self) -> io::Result<()>;

    /// Signal that no further segments will be written.
    fn finish(&mut self) -> io::Result<()>;

    /// Release the sink's resources. Safe after `finish`.
    fn close(&mut self);
}

impl<S: ChunkSource + ?Sized> ChunkSource for &mut S {
    fn next_segment(&mut self) -> bool {
        (**self).next_segment()
    }

    fn next_chunk(&mut self) -> io::Result<Option<Vec<u8>>> {
        (**self).next_chunk()
    }
}

impl<K: ChunkSink + ?Sized> ChunkSink for &mut K {
    fn add_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        (**self).add_chunk(chunk)
    }

    fn next_segment(&mut self) -> io::Result<()> {
        (**self).next_segment()
    }

    fn finish(&mut self) -> io::Result<()> {
        (**self).finish()
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// In-memory [`ChunkSource`] over a list of segments, each a list of byte
/// chunks.
#[derive(Debug, Clone)]
pub struct VecChunkSource {
    segments: VecDeque<VecDeque<Vec<u8>>>,
    current: Option<VecDeque<Vec<u8>>>,
}

impl VecChunkSource {
    /// Create a source over the given segments.
    pub fn new(segments: Vec<Vec<Vec<u8>>>) -> Self {
        Self {
            segments: segments.into_iter().map(VecDeque::from).collect(),
            current: None,
        }
    }

    /// Create a source with a single segment made of the given chunks.
    pub fn single_segment(chunks: Vec<Vec<u8>>) -> Self {
        Self::new(vec![chunks])
    }
}

impl ChunkSource for VecChunkSource {
    fn next_segment(&mut self) -> bool {
        self.current = self.segments.pop_front();
        self.current.is_some()
    }

    fn next_chunk(&mut self) -> io::Result<Option<Vec<u8>>> {
        Ok(self.current.as_mut().and_then(VecDeque::pop_front))
    }
}

/// In-memory [`ChunkSink`] recording the bytes of each segment.
///
/// A segment is opened by `next_segment`, or lazily by the first
/// `add_chunk` so that single-segment writers need no explicit advance.
#[derive(Debug, Clone, Default)]
pub struct VecChunkSink {
    segments: Vec<Vec<u8>>,
    open: bool,
    finish_calls: u32,
    closed: bool,
}

impl VecChunkSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// The bytes written to each segment so far.
    pub fn segments(&self) -> &[Vec<u8>] {
        &self.segments
    }

    /// Whether `finish` has been signalled.
    pub fn is_finished(&self) -> bool {
        self.finish_calls > 0
    }

    /// How many times `finish` has been signalled.
    pub fn finish_calls(&self) -> u32 {
        self.finish_calls
    }

    /// Whether the sink has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl ChunkSink for VecChunkSink {
    fn add_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        if !self.open {
            self.segments.push(Vec::new());
            self.open = true;
        }
        self.segments
            .last_mut()
            .expect("segment opened above")
            .extend_from_slice(chunk);
        Ok(())
    }

    fn next_segment(&mut self) -> io::Result<()> {
        self.segments.push(Vec::new());
        self.open = true;
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.finish_calls += 1;
        Ok(())
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

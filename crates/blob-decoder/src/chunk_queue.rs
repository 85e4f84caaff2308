use std::collections::VecDeque;

use bytes::{Bytes, BytesMut};

use crate::reader::{InsufficientData, TakeBytes};

/// Ordered queue of not-yet-consumed input chunks.
///
/// Chunks arrive with arbitrary boundaries. [`take`](Self::take) cuts an
/// exact-length span across as many chunks as needed; if the queue is
/// short, nothing is consumed, so the same read can be retried once more
/// data has been pushed.
///
/// For reads made of several fields, [`begin`](Self::begin) opens a
/// [`QueueCursor`] that walks the queue by index without touching it.
/// Only [`QueueCursor::commit`] drops consumed chunks and re-slices the
/// front one; dropping the cursor instead leaves the queue as it was.
///
/// ```text
///   chunks:  [ a b c ] [ d e ] [ f g h i ]
///   take(4):   a b c     d          → "abcd"
///   after:             [ e ] [ f g h i ]
/// ```
#[derive(Debug, Default)]
pub struct ChunkQueue {
  chunks: VecDeque<Bytes>,
  /// Total bytes across `chunks`.
  len: usize,
  /// Bytes consumed since the queue was created.
  consumed: usize,
}

impl ChunkQueue {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Append a chunk. Empty chunks are dropped.
  pub fn push(&mut self, chunk: Bytes) {
    if chunk.is_empty() {
      return;
    }
    self.len += chunk.len();
    self.chunks.push_back(chunk);
  }

  /// Buffered bytes.
  #[must_use]
  pub fn len(&self) -> usize {
    self.len
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  #[must_use]
  pub fn chunk_count(&self) -> usize {
    self.chunks.len()
  }

  /// Absolute offset of the first buffered byte.
  #[must_use]
  pub fn consumed(&self) -> usize {
    self.consumed
  }

  /// Take exactly `len` bytes from the front of the queue.
  ///
  /// The span is zero-copy when it lies inside one chunk and is copied
  /// into a fresh buffer when it crosses chunk boundaries.
  ///
  /// # Errors
  ///
  /// Returns [`InsufficientData`] if fewer than `len` bytes are buffered.
  /// The queue is left exactly as it was.
  pub fn take(&mut self, len: usize) -> Result<Bytes, InsufficientData> {
    let mut cursor = self.begin();
    let span = cursor.take(len)?;
    cursor.commit();
    Ok(span)
  }

  /// Open a read transaction over the buffered chunks.
  pub fn begin(&mut self) -> QueueCursor<'_> {
    QueueCursor {
      queue: self,
      chunk: 0,
      offset: 0,
      taken: 0,
    }
  }
}

/// Index-based read position inside a [`ChunkQueue`].
///
/// `chunk` and `offset` locate the next unread byte; `taken` counts bytes
/// read through this cursor. The queue itself is only modified by
/// [`commit`](Self::commit).
#[derive(Debug)]
pub struct QueueCursor<'a> {
  queue: &'a mut ChunkQueue,
  chunk: usize,
  offset: usize,
  taken: usize,
}

impl QueueCursor<'_> {
  /// Bytes read through this cursor so far.
  #[must_use]
  pub fn taken(&self) -> usize {
    self.taken
  }

  /// Apply everything read through this cursor to the queue.
  pub fn commit(self) {
    let queue = self.queue;
    queue.chunks.drain(..self.chunk);
    if self.offset > 0
      && let Some(front) = queue.chunks.front_mut()
    {
      *front = front.slice(self.offset..);
    }
    queue.len -= self.taken;
    queue.consumed += self.taken;
  }

  fn advance(&mut self, len: usize) {
    self.offset += len;
    self.taken += len;
    if self.offset == self.queue.chunks[self.chunk].len() {
      self.chunk += 1;
      self.offset = 0;
    }
  }
}

impl TakeBytes for QueueCursor<'_> {
  type Span = Bytes;

  fn take(&mut self, len: usize) -> Result<Bytes, InsufficientData> {
    let available = self.remaining();
    if len > available {
      return Err(InsufficientData {
        requested: len,
        available,
      });
    }
    if len == 0 {
      return Ok(Bytes::new());
    }

    let current = &self.queue.chunks[self.chunk];
    if current.len() - self.offset >= len {
      let span = current.slice(self.offset..self.offset + len);
      self.advance(len);
      return Ok(span);
    }

    let mut span = BytesMut::with_capacity(len);
    while span.len() < len {
      let current = &self.queue.chunks[self.chunk];
      let piece = (current.len() - self.offset).min(len - span.len());
      span.extend_from_slice(&current[self.offset..self.offset + piece]);
      self.advance(piece);
    }
    Ok(span.freeze())
  }

  fn peek(&self) -> Option<u8> {
    self
      .queue
      .chunks
      .get(self.chunk)
      .and_then(|chunk| chunk.get(self.offset))
      .copied()
  }

  fn remaining(&self) -> usize {
    self.queue.len - self.taken
  }

  fn position(&self) -> usize {
    self.queue.consumed + self.taken
  }
}

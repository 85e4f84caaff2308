/// Returned when a requested span is longer than what is buffered.
///
/// In a one-shot decode this becomes
/// [`DecodeError::TruncatedBuffer`](crate::DecodeError::TruncatedBuffer);
/// in streaming it only means "pull another chunk and retry".
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("insufficient data: requested {requested} bytes, {available} available")]
pub struct InsufficientData {
  pub requested: usize,
  pub available: usize,
}

/// A source the record parser can cut exact-length spans from.
///
/// Implemented by [`SliceReader`] for complete buffers and by
/// [`QueueCursor`](crate::QueueCursor) for chunked input. A failed
/// `take` must not move the read position.
pub trait TakeBytes {
  /// Owned or borrowed view of a taken span.
  type Span: AsRef<[u8]>;

  /// Take exactly `len` bytes.
  ///
  /// # Errors
  ///
  /// Returns [`InsufficientData`] if fewer than `len` bytes remain. The
  /// reader is left unchanged.
  fn take(&mut self, len: usize) -> Result<Self::Span, InsufficientData>;

  /// The next byte, without taking it.
  fn peek(&self) -> Option<u8>;

  /// Bytes still available to take.
  fn remaining(&self) -> usize;

  /// Absolute offset of the next byte, for error reporting.
  fn position(&self) -> usize;
}

/// Cursor over a complete in-memory blob. Spans borrow the buffer.
pub struct SliceReader<'a> {
  buf: &'a [u8],
  pos: usize,
}

impl<'a> SliceReader<'a> {
  #[must_use]
  pub fn new(buf: &'a [u8]) -> Self {
    Self { buf, pos: 0 }
  }
}

impl<'a> TakeBytes for SliceReader<'a> {
  type Span = &'a [u8];

  fn take(&mut self, len: usize) -> Result<&'a [u8], InsufficientData> {
    let available = self.remaining();
    if len > available {
      return Err(InsufficientData {
        requested: len,
        available,
      });
    }
    let span = &self.buf[self.pos..self.pos + len];
    self.pos += len;
    Ok(span)
  }

  fn peek(&self) -> Option<u8> {
    self.buf.get(self.pos).copied()
  }

  fn remaining(&self) -> usize {
    self.buf.len() - self.pos
  }

  fn position(&self) -> usize {
    self.pos
  }
}

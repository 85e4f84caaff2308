use std::collections::VecDeque;
use std::io;

use blob_types::Record;
use bytes::{Bytes, BytesMut};
use futures::stream::{self, BoxStream, Stream, StreamExt};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::chunk_queue::ChunkQueue;
use crate::error::DecodeError;
use crate::reader::TakeBytes;
use crate::record_parser::{ParseError, RecordParser};

/// Read size used by [`StreamingDecoder::from_reader`].
pub const DEFAULT_READ_CHUNK_SIZE: usize = 8 * 1024;

/// Boxed chunk source produced by [`reader_chunks`].
pub type ChunkStream<'a> = BoxStream<'a, io::Result<Bytes>>;

/// Asynchronous streaming decoder. Yields records as soon as their
/// bytes have arrived, whatever the chunk boundaries.
///
/// The decoder owns three pieces of state:
///
/// ```text
///   source ──chunks──▶ ChunkQueue ──parse──▶ pending ──next()──▶ caller
/// ```
///
/// Each call to [`next`](Self::next) first hands out an already decoded
/// record if one is pending. Otherwise it parses as many whole records as
/// the queue holds. When a parse attempt runs out of bytes, the attempt is
/// rolled back (the queue is untouched) and one more chunk is pulled from
/// the source before retrying. The only await point is that pull.
///
/// A record without extra payload can only be emitted once the byte after
/// its data block has arrived, or the source has ended, because that byte
/// decides whether an extra block follows.
///
/// # Example
///
/// ```rust
/// use blob_decoder::StreamingDecoder;
/// use blob_encoder::BlobEncoder;
/// use blob_types::ArrayRecord;
/// use bytes::Bytes;
///
/// # tokio_test_block_on(async {
/// let blob = BlobEncoder::new()
///     .add_array(ArrayRecord::new(vec![4], vec![1i16, 2, 3, 4]).unwrap())
///     .encode()
///     .unwrap();
///
/// // one byte per chunk
/// let chunks = blob.into_iter().map(|b| Ok::<_, std::io::Error>(Bytes::from(vec![b])));
/// let mut decoder = StreamingDecoder::new(futures::stream::iter(chunks));
///
/// let record = decoder.next().await.unwrap().unwrap();
/// assert_eq!(record.array.shape, vec![4]);
/// assert!(decoder.next().await.is_none());
/// # });
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
pub struct StreamingDecoder<S> {
  source: S,
  queue: ChunkQueue,
  pending: VecDeque<Record>,
  parser: RecordParser,
  /// Buffered bytes the last failed attempt needed before it could get
  /// further. Parsing is skipped until the queue holds at least this much.
  needed: usize,
  state: StreamState,
}

/// Lifecycle of a streaming decoder.
///
/// ```text
///   Reading → Drained → Done
///      └──── (error) ────┘
/// ```
///
/// `Reading` pulls from the source; `Drained` means the source has ended
/// and only buffered bytes remain; `Done` yields nothing further.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StreamState {
  Reading,
  Drained,
  Done,
}

/// Outcome of one parse pass over the queue.
enum Pass {
  /// Stopped because the buffered bytes end mid-record.
  NeedMore,
  /// Source ended and every buffered byte was consumed.
  End,
}

impl<S> StreamingDecoder<S>
where
  S: Stream<Item = io::Result<Bytes>> + Unpin,
{
  #[must_use]
  pub fn new(source: S) -> Self {
    Self {
      source,
      queue: ChunkQueue::new(),
      pending: VecDeque::new(),
      parser: RecordParser::default(),
      needed: 0,
      state: StreamState::Reading,
    }
  }

  /// Bytes received from the source but not yet consumed by a record.
  #[must_use]
  pub fn buffered_bytes(&self) -> usize {
    self.queue.len()
  }

  /// Read the next record.
  ///
  /// Returns `Some(Ok(record))` for each record in stream order, `None`
  /// once the source has ended on a record boundary, or `Some(Err(_))` on
  /// a terminal error, after which every call returns `None`.
  pub async fn next(&mut self) -> Option<Result<Record, DecodeError>> {
    loop {
      if let Some(record) = self.pending.pop_front() {
        return Some(Ok(record));
      }

      match self.state {
        StreamState::Done => return None,
        StreamState::Reading if self.queue.len() < self.needed => {}
        StreamState::Reading | StreamState::Drained => match self.parse_buffered() {
          Ok(Pass::End) => {
            self.state = StreamState::Done;
            tracing::debug!(offset = self.queue.consumed(), "blob stream finished");
            continue;
          }
          Ok(Pass::NeedMore) if !self.pending.is_empty() => continue,
          Ok(Pass::NeedMore) => {
            if self.state == StreamState::Drained {
              self.state = StreamState::Done;
              return Some(Err(DecodeError::IncompleteStream {
                buffered: self.queue.len(),
              }));
            }
          }
          Err(err) => {
            self.state = StreamState::Done;
            return Some(Err(err));
          }
        },
      }

      // Only Reading reaches this point: the queue is short of a record.
      match self.source.next().await {
        Some(Ok(chunk)) => {
          tracing::trace!(len = chunk.len(), buffered = self.queue.len(), "received chunk");
          self.queue.push(chunk);
        }
        Some(Err(err)) => {
          self.state = StreamState::Done;
          return Some(Err(DecodeError::Io(err)));
        }
        None => {
          tracing::trace!(buffered = self.queue.len(), "chunk source ended");
          self.state = StreamState::Drained;
          self.needed = 0;
        }
      }
    }
  }

  /// Decode every complete record currently buffered into `pending`.
  fn parse_buffered(&mut self) -> Result<Pass, DecodeError> {
    let at_eof = self.state == StreamState::Drained;

    loop {
      let mut cursor = self.queue.begin();
      match self.parser.parse_next(&mut cursor, at_eof) {
        Ok(Some(record)) => {
          let start = cursor.position() - cursor.taken();
          cursor.commit();
          tracing::trace!(
            offset = start,
            dtype = %record.array.dtype(),
            shape = ?record.array.shape,
            "decoded record"
          );
          self.pending.push_back(record);
          self.needed = 0;
        }
        Ok(None) => return Ok(Pass::End),
        Err(ParseError::Insufficient(short)) => {
          // Dropping the cursor rolls the queue back to the record start.
          self.needed = cursor.taken().saturating_add(short.requested);
          return Ok(Pass::NeedMore);
        }
        Err(ParseError::Fatal(err)) => return Err(err),
      }
    }
  }

  /// Turn the decoder into a [`Stream`] of records.
  pub fn into_stream(self) -> impl Stream<Item = Result<Record, DecodeError>> {
    stream::unfold(self, |mut decoder| async move {
      decoder.next().await.map(|item| (item, decoder))
    })
  }
}

impl<'a> StreamingDecoder<ChunkStream<'a>> {
  /// Decode from any async reader, reading [`DEFAULT_READ_CHUNK_SIZE`]
  /// bytes at a time.
  pub fn from_reader<R>(reader: R) -> Self
  where
    R: AsyncRead + Unpin + Send + 'a,
  {
    Self::new(reader_chunks(reader, DEFAULT_READ_CHUNK_SIZE))
  }
}

/// Adapt an [`AsyncRead`] into a chunk source. Each chunk holds whatever a
/// single read returned, at most `chunk_size` bytes. A read error is
/// yielded once and ends the stream.
pub fn reader_chunks<'a, R>(reader: R, chunk_size: usize) -> ChunkStream<'a>
where
  R: AsyncRead + Unpin + Send + 'a,
{
  let chunk_size = chunk_size.max(1);
  stream::unfold(Some(reader), move |reader| async move {
    let mut reader = reader?;
    let mut buf = BytesMut::zeroed(chunk_size);
    match reader.read(&mut buf).await {
      Ok(0) => None,
      Ok(n) => {
        buf.truncate(n);
        Some((Ok(buf.freeze()), Some(reader)))
      }
      Err(err) => Some((Err(err), None)),
    }
  })
  .boxed()
}

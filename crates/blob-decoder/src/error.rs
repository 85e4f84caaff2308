use blob_types::TypeError;
use blob_wire::WireError;

/// Errors that can occur while decoding a blob.
///
/// All of these are terminal: a failed call returns no records, and a
/// streaming decoder that has reported one yields nothing further.
/// Running short of buffered input in the streaming decoder is not an
/// error; it only becomes [`DecodeError::IncompleteStream`] once the
/// source has ended.
///
/// ```text
///   DecodeError
///   ├── MalformedHeader    ← zero or reserved dtype code
///   ├── TruncatedBuffer    ← a field runs past the end of the buffer
///   ├── ArrayTooLarge      ← product(shape) × width overflows
///   ├── InvalidExtraFlag   ← flag not in {0, 1, 2}; 3 is reserved
///   ├── InvalidExtra       ← JSON extra is not valid UTF-8 JSON
///   ├── MissingSeparator   ← byte between records is not 0x00
///   ├── IncompleteStream   ← source ended mid-record
///   └── Io(std::io::Error) ← from the chunk source
/// ```
///
/// Offsets are absolute byte positions from the start of the blob or
/// stream.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
  /// The two header bytes at `offset` do not form a valid header.
  #[error("malformed header at offset {offset}: {source}")]
  MalformedHeader {
    offset: usize,
    #[source]
    source: WireError,
  },

  /// A field declared more bytes than the buffer holds.
  #[error("truncated buffer at offset {offset}: needed {needed} bytes, {available} available")]
  TruncatedBuffer {
    offset: usize,
    needed: usize,
    available: usize,
  },

  /// The declared shape cannot be held in memory on this platform.
  #[error("array at offset {offset} with shape {shape:?} is too large to decode")]
  ArrayTooLarge { offset: usize, shape: Vec<u64> },

  /// The byte after a data block is not a known extra flag.
  #[error("invalid extra flag {flag} at offset {offset}{}", reserved_note(.flag))]
  InvalidExtraFlag { flag: u8, offset: usize },

  /// The extra payload at `offset` could not be interpreted.
  #[error("invalid extra payload at offset {offset}: {source}")]
  InvalidExtra {
    offset: usize,
    #[source]
    source: TypeError,
  },

  /// A record was followed by something other than the 0x00 separator.
  #[error("expected record separator 0x00 at offset {offset}, found {found:#04X}")]
  MissingSeparator { found: u8, offset: usize },

  /// The chunk source ended with bytes that do not complete a record.
  #[error("stream ended with {buffered} undecodable bytes")]
  IncompleteStream { buffered: usize },

  /// The chunk source failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),
}

fn reserved_note(flag: &u8) -> &'static str {
  if *flag == blob_wire::extra_flag::RESERVED_STRUCTURED_FLAG {
    " (reserved, not implemented)"
  } else {
    ""
  }
}

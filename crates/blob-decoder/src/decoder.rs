use blob_types::Record;

use crate::error::DecodeError;
use crate::reader::SliceReader;
use crate::record_parser::{ParseError, RecordParser};

/// Synchronous blob decoder. Parses a complete in-memory buffer.
///
/// Decoding is a single left-to-right pass applying the record grammar
/// until the buffer is exhausted:
///
///   1. **Header**: signed dtype byte (sign = byte order) and signed
///      dimension-count byte (sign = shape entry width).
///   2. **Shape + data**: shape entries then `product(shape) × width`
///      element bytes, both in the record's byte order. Float16 elements
///      are widened to `f32`.
///   3. **Extra**: if bytes remain, a flag byte. `0` ends the record and
///      also serves as the separator before the next one; `1` and `2`
///      carry a u32 length and payload, after which the next record must
///      be preceded by a `0x00` separator.
///
/// Any error aborts the whole call; no partial record list is returned.
///
/// # Example
///
/// ```rust
/// use blob_decoder::BlobDecoder;
/// use blob_encoder::BlobEncoder;
/// use blob_types::ArrayRecord;
///
/// let blob = BlobEncoder::new()
///     .add_array(ArrayRecord::new(vec![3], vec![1u16, 2, 3]).unwrap())
///     .add_array(ArrayRecord::scalar(vec![0.5f64]).unwrap())
///     .encode()
///     .unwrap();
///
/// let records = BlobDecoder::decode(&blob).unwrap();
/// assert_eq!(records.len(), 2);
/// ```
pub struct BlobDecoder;

impl BlobDecoder {
  /// Decode every record in `buffer`.
  ///
  /// An empty buffer decodes to an empty list.
  ///
  /// # Errors
  ///
  /// - [`DecodeError::MalformedHeader`] for a zero or reserved dtype code.
  /// - [`DecodeError::TruncatedBuffer`] when a field runs past the end.
  /// - [`DecodeError::ArrayTooLarge`] when the declared data size overflows.
  /// - [`DecodeError::InvalidExtraFlag`] for flags other than 0, 1 and 2.
  /// - [`DecodeError::InvalidExtra`] for a JSON extra that does not parse.
  /// - [`DecodeError::MissingSeparator`] when a record with extra is
  ///   followed by a non-zero byte.
  pub fn decode(buffer: &[u8]) -> Result<Vec<Record>, DecodeError> {
    let mut reader = SliceReader::new(buffer);
    let mut parser = RecordParser::default();
    let mut records = Vec::new();

    loop {
      match parser.parse_next(&mut reader, true) {
        Ok(Some(record)) => records.push(record),
        Ok(None) => break,
        Err(ParseError::Fatal(err)) => return Err(err),
        Err(ParseError::Insufficient(short)) => {
          return Err(DecodeError::TruncatedBuffer {
            offset: buffer.len() - short.available,
            needed: short.requested,
            available: short.available,
          });
        }
      }
    }

    tracing::debug!(records = records.len(), bytes = buffer.len(), "decoded blob");
    Ok(records)
  }
}

/// Shorthand for [`BlobDecoder::decode`].
///
/// # Errors
///
/// See [`BlobDecoder::decode`].
pub fn decode(buffer: &[u8]) -> Result<Vec<Record>, DecodeError> {
  BlobDecoder::decode(buffer)
}

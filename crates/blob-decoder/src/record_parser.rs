use blob_types::{ArrayData, ArrayRecord, Extra, Record, shape_product};
use blob_wire::{ExtraFlag, HEADER_SIZE, RECORD_SEPARATOR, RecordHeader};

use crate::error::DecodeError;
use crate::reader::{InsufficientData, TakeBytes};

/// Why a parse attempt stopped without producing a record.
#[derive(Debug)]
pub(crate) enum ParseError {
  /// The reader ran dry mid-record. Not an error for a stream that may
  /// still deliver more bytes; the caller discards the attempt.
  Insufficient(InsufficientData),
  /// The bytes are malformed. Terminal.
  Fatal(DecodeError),
}

impl From<InsufficientData> for ParseError {
  fn from(short: InsufficientData) -> Self {
    Self::Insufficient(short)
  }
}

impl From<DecodeError> for ParseError {
  fn from(err: DecodeError) -> Self {
    Self::Fatal(err)
  }
}

/// Field-by-field record grammar shared by the one-shot and streaming
/// decoders.
///
/// ```text
///   [0x00]                  separator: required after a record with
///                           extra, optional after an explicit flag 0
///   header                  2 bytes
///   shape                   ndim × 2 or ndim × 4 bytes
///   data                    product(shape) × width bytes
///   ── end of input here ends the record with no extra ──
///   flag                    0 → done (this byte may also be the separator)
///                           1 / 2 → u32 length + payload follow
///   length, payload
/// ```
///
/// A header never starts with `0x00`, so a zero after flag 0 can only be
/// a separator.
///
/// Whether input has ended matters in two places: before a record (clean
/// end of blob) and right after the data block (no extra flag). A reader
/// that is merely empty for now, with `at_eof == false`, yields
/// [`ParseError::Insufficient`] in both places.
///
/// The parser's only state is the separator owed before the next record.
/// It is updated on success only, so an abandoned attempt can be replayed
/// from scratch.
#[derive(Debug, Default)]
pub(crate) struct RecordParser {
  separator: Separator,
}

/// What may precede the next record header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Separator {
  /// First record, or the previous one ended without a flag byte.
  #[default]
  None,
  /// The previous record wrote flag 0; a `0x00` here is skipped.
  Optional,
  /// The previous record carried extra.
  Required,
}

impl RecordParser {
  /// Parse the next record.
  ///
  /// Returns `Ok(None)` at a clean end of input (`at_eof` set and nothing
  /// left to read).
  pub(crate) fn parse_next<R: TakeBytes>(
    &mut self,
    reader: &mut R,
    at_eof: bool,
  ) -> Result<Option<Record>, ParseError> {
    if reader.remaining() == 0 {
      return if at_eof {
        Ok(None)
      } else {
        Err(InsufficientData {
          requested: 1,
          available: 0,
        }
        .into())
      };
    }

    match self.separator {
      Separator::None => {}
      Separator::Optional => {
        if reader.peek() == Some(RECORD_SEPARATOR) {
          reader.take(1)?;
        }
      }
      Separator::Required => {
        let offset = reader.position();
        let found = reader.take(1)?.as_ref()[0];
        if found != RECORD_SEPARATOR {
          return Err(DecodeError::MissingSeparator { found, offset }.into());
        }
      }
    }

    let header_offset = reader.position();
    let header = RecordHeader::read_from(reader.take(HEADER_SIZE)?.as_ref()).map_err(|source| {
      DecodeError::MalformedHeader {
        offset: header_offset,
        source,
      }
    })?;

    let shape = header
      .read_shape(reader.take(header.shape_len())?.as_ref())
      .map_err(|source| DecodeError::MalformedHeader {
        offset: header_offset,
        source,
      })?;

    let data_len = shape_product(&shape)
      .and_then(|count| count.checked_mul(header.dtype.size() as u64))
      .and_then(|len| usize::try_from(len).ok())
      .ok_or_else(|| DecodeError::ArrayTooLarge {
        offset: header_offset,
        shape: shape.clone(),
      })?;
    let data = reader.take(data_len)?;
    let array = ArrayRecord {
      shape,
      data: ArrayData::read_from(header.dtype, header.byte_order, data.as_ref()),
    };

    let (extra, separator) = if reader.remaining() == 0 {
      if !at_eof {
        return Err(
          InsufficientData {
            requested: 1,
            available: 0,
          }
          .into(),
        );
      }
      (None, Separator::None)
    } else {
      let flag_offset = reader.position();
      let raw_flag = reader.take(1)?.as_ref()[0];
      let flag = ExtraFlag::from_wire_byte(raw_flag).map_err(|_| DecodeError::InvalidExtraFlag {
        flag: raw_flag,
        offset: flag_offset,
      })?;

      if flag.has_payload() {
        let len_bytes = reader.take(4)?;
        let len = len_bytes.as_ref();
        let len = header.byte_order.read_u32([len[0], len[1], len[2], len[3]]) as usize;
        let payload = reader.take(len)?;
        let extra = Extra::from_payload(flag, payload.as_ref()).map_err(|source| {
          DecodeError::InvalidExtra {
            offset: flag_offset,
            source,
          }
        })?;
        (extra, Separator::Required)
      } else {
        (None, Separator::Optional)
      }
    };

    self.separator = separator;
    Ok(Some(Record { array, extra }))
  }
}

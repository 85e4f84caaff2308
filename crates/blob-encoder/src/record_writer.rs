use blob_types::Record;
use blob_wire::{ByteOrder, RecordHeader};

use crate::error::EncodeError;

/// Serialize one record (header, shape, data, optional extra) onto `out`.
///
/// ```text
/// ┌───────────┬──────────────────────────────────────────────┐
/// │ 2 bytes   │ header (signed dtype, signed ndim)           │
/// │ 2n / 4n   │ shape entries, u16 or u32                    │
/// │ N × width │ element data                                 │
/// │ 1 byte    │ extra flag (1 = bytes, 2 = JSON)  ─┐         │
/// │ 4 bytes   │ extra length (u32)                 │ only if │
/// │ len bytes │ extra payload                     ─┘ extra   │
/// └───────────┴──────────────────────────────────────────────┘
/// ```
///
/// A record without extra ends right after its data. Shape entries,
/// elements and the extra length all follow `order`.
///
/// `index` is only used to label errors. On error `out` may hold a
/// partially written record; [`encode`](crate::encode) discards it.
///
/// # Errors
///
/// - [`EncodeError::TooManyDimensions`] / [`EncodeError::DimensionTooLarge`]
///   when the shape exceeds the header's limits.
/// - [`EncodeError::ShapeMismatch`] when the element count is wrong.
/// - [`EncodeError::ExtraTooLarge`] when the extra payload needs more
///   than a u32 length.
/// - [`EncodeError::Type`] when a JSON extra fails to serialize.
pub fn write_record(
    out: &mut Vec<u8>,
    record: &Record,
    index: usize,
    order: ByteOrder,
) -> Result<(), EncodeError> {
    let array = &record.array;

    // Header limits first: a dimension >= 2^32 should be reported as such,
    // not as an element-count mismatch.
    let header = RecordHeader::for_shape(array.dtype(), &array.shape, order)
        .map_err(|e| EncodeError::from_wire(index, e))?;
    array
        .validate()
        .map_err(|e| EncodeError::from_type(index, e))?;

    out.reserve(2 + header.shape_len() + array.data.byte_len());
    out.extend_from_slice(&header.to_bytes());
    header.write_shape(&array.shape, out);
    array.data.write_to(order, out);

    if let Some(extra) = &record.extra {
        let payload = extra
            .to_payload()
            .map_err(|e| EncodeError::from_type(index, e))?;
        let len = u32::try_from(payload.len()).map_err(|_| EncodeError::ExtraTooLarge {
            record: index,
            len: payload.len(),
        })?;

        out.push(extra.flag().to_wire_byte());
        order.write_u32(len, out);
        out.extend_from_slice(&payload);
    }

    Ok(())
}

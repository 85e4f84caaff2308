use blob_types::{ArrayData, ArrayRecord, Extra, Record, TypeError, shape_product};
use blob_wire::{ByteOrder, DType, RECORD_SEPARATOR};

use crate::error::EncodeError;
use crate::record_writer::write_record;

/// Settings for one encode call.
///
/// ```text
/// ┌────────────┬────────────────────────────────────────────────────┐
/// │ Field      │ Purpose                                            │
/// ├────────────┼────────────────────────────────────────────────────┤
/// │ byte_order │ Order for every record in the call (default: host) │
/// └────────────┴────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    pub byte_order: ByteOrder,
}

impl EncodeOptions {
    #[must_use]
    pub fn little_endian() -> Self {
        Self {
            byte_order: ByteOrder::Little,
        }
    }

    #[must_use]
    pub fn big_endian() -> Self {
        Self {
            byte_order: ByteOrder::Big,
        }
    }
}

/// Encode records into a single blob.
///
/// Records are written back to back with one `0x00` byte before every
/// record except the first. An empty slice encodes to an empty blob.
///
/// # Errors
///
/// Fails on the first record that violates a limit; see
/// [`write_record`](crate::record_writer::write_record). Nothing is
/// returned for the records that were valid.
pub fn encode(records: &[Record], options: &EncodeOptions) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();

    for (index, record) in records.iter().enumerate() {
        if index > 0 {
            out.push(RECORD_SEPARATOR);
        }
        write_record(&mut out, record, index, options.byte_order)?;
    }

    tracing::debug!(
        records = records.len(),
        bytes = out.len(),
        byte_order = ?options.byte_order,
        "encoded blob"
    );
    Ok(out)
}

/// Blob builder. Collects records, then serializes them in one call.
///
/// Methods like [`add_array`](Self::add_array) append records and
/// [`with_extra`](Self::with_extra) attaches metadata to the most
/// recently added one, mirroring how a caller usually assembles a batch.
///
/// ```rust
/// use blob_encoder::BlobEncoder;
/// use blob_types::ArrayRecord;
/// use serde_json::json;
///
/// let blob = BlobEncoder::new()
///     .little_endian()
///     .add_array(ArrayRecord::new(vec![2, 3], vec![1.1f32, 2.2, 3.3, 4.4, 5.5, 6.6]).unwrap())
///     .with_extra(json!({"min": 1.1, "max": 6.6}))
///     .unwrap()
///     .encode()
///     .unwrap();
///
/// assert_eq!(&blob[..2], &[0x0A, 0x02]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct BlobEncoder {
    records: Vec<Record>,
    options: EncodeOptions,
}

impl BlobEncoder {
    /// Create an empty encoder using host byte order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn byte_order(&mut self, order: ByteOrder) -> &mut Self {
        self.options.byte_order = order;
        self
    }

    pub fn little_endian(&mut self) -> &mut Self {
        self.byte_order(ByteOrder::Little)
    }

    pub fn big_endian(&mut self) -> &mut Self {
        self.byte_order(ByteOrder::Big)
    }

    /// Append a record as-is.
    pub fn add_record(&mut self, record: Record) -> &mut Self {
        self.records.push(record);
        self
    }

    /// Append an array with no extra payload.
    pub fn add_array(&mut self, array: ArrayRecord) -> &mut Self {
        self.add_record(Record::new(array))
    }

    /// Append an array given as a dtype code and raw element bytes.
    ///
    /// `data` holds `product(shape)` elements in `source_order`; they are
    /// re-emitted in the encoder's byte order. Float16 bytes are kept as
    /// half-precision bit patterns.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::UnsupportedDType`] if `dtype_code` is not one of
    ///   the nine supported codes.
    /// - [`EncodeError::ShapeMismatch`] if `data` is not exactly
    ///   `product(shape) × width` bytes long.
    pub fn add_raw(
        &mut self,
        dtype_code: u8,
        shape: Vec<u64>,
        data: &[u8],
        source_order: ByteOrder,
    ) -> Result<&mut Self, EncodeError> {
        let index = self.records.len();
        let dtype = DType::from_code(dtype_code)
            .map_err(|_| EncodeError::UnsupportedDType { code: dtype_code })?;

        let expected = shape_product(&shape).ok_or_else(|| {
            EncodeError::from_type(index, TypeError::ShapeOverflow { shape: shape.clone() })
        })?;
        let width = dtype.size();
        if u64::try_from(data.len()).ok() != expected.checked_mul(width as u64) {
            return Err(EncodeError::ShapeMismatch {
                record: index,
                shape,
                expected,
                actual: data.len() / width,
            });
        }

        let array = ArrayRecord::new(shape, ArrayData::from_raw(dtype, source_order, data))
            .map_err(|e| EncodeError::from_type(index, e))?;
        Ok(self.add_array(array))
    }

    /// Attach an extra payload to the most recently added record,
    /// replacing any extra it already had.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::InvalidExtraTarget`] if no record has been
    /// added yet.
    pub fn with_extra(&mut self, extra: impl Into<Extra>) -> Result<&mut Self, EncodeError> {
        let last = self
            .records
            .last_mut()
            .ok_or(EncodeError::InvalidExtraTarget)?;
        last.extra = Some(extra.into());
        Ok(self)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Serialize every added record into one blob.
    ///
    /// # Errors
    ///
    /// See [`encode`].
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        encode(&self.records, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blob_decoder::BlobDecoder;
    use serde_json::json;

    fn float_2x3() -> ArrayRecord {
        ArrayRecord::new(vec![2, 3], vec![1.1f32, 2.2, 3.3, 4.4, 5.5, 6.6]).unwrap()
    }

    #[test]
    fn empty_encoder_produces_empty_blob() {
        let blob = BlobEncoder::new().encode().unwrap();
        assert!(blob.is_empty());
        assert!(BlobDecoder::decode(&blob).unwrap().is_empty());
    }

    #[test]
    fn single_record_ends_after_data() {
        let blob = BlobEncoder::new().little_endian().add_array(float_2x3()).encode().unwrap();
        assert_eq!(blob.len(), 2 + 4 + 24);
        assert_eq!(&blob[..6], &[0x0A, 0x02, 0x02, 0x00, 0x03, 0x00]);
        assert_eq!(&blob[6..10], &1.1f32.to_le_bytes());
    }

    #[test]
    fn records_are_separated_by_one_zero_byte() {
        let first = ArrayRecord::new(vec![1], vec![5u8]).unwrap();
        let second = ArrayRecord::new(vec![1], vec![6u8]).unwrap();
        let blob = BlobEncoder::new()
            .little_endian()
            .add_array(first)
            .add_array(second)
            .encode()
            .unwrap();
        assert_eq!(blob, [0x01, 0x01, 0x01, 0x00, 5, 0x00, 0x01, 0x01, 0x01, 0x00, 6]);
    }

    #[test]
    fn with_extra_targets_last_record() {
        let mut encoder = BlobEncoder::new();
        encoder
            .add_array(float_2x3())
            .add_array(float_2x3())
            .with_extra(json!({"tag": "second"}))
            .unwrap();

        assert!(encoder.records()[0].extra.is_none());
        assert_eq!(
            encoder.records()[1].extra,
            Some(Extra::Json(json!({"tag": "second"})))
        );
    }

    #[test]
    fn with_extra_without_record_fails() {
        let err = BlobEncoder::new().with_extra(vec![1u8]).unwrap_err();
        assert!(matches!(err, EncodeError::InvalidExtraTarget));
    }

    #[test]
    fn both_byte_orders_decode_identically() {
        let records = vec![
            Record::with_extra(float_2x3(), json!({"min": 1.1, "max": 6.6})),
            Record::new(ArrayRecord::new(vec![2], vec![-3i32, 70_000]).unwrap()),
        ];
        let le = encode(&records, &EncodeOptions::little_endian()).unwrap();
        let be = encode(&records, &EncodeOptions::big_endian()).unwrap();
        assert_ne!(le, be);
        assert_eq!(BlobDecoder::decode(&le).unwrap(), records);
        assert_eq!(BlobDecoder::decode(&be).unwrap(), records);
    }

    #[test]
    fn add_raw_converts_source_order() {
        let mut encoder = BlobEncoder::new();
        encoder
            .little_endian()
            .add_raw(2, vec![2], &[0x12, 0x34, 0xAB, 0xCD], ByteOrder::Big)
            .unwrap();
        let blob = encoder.encode().unwrap();
        assert_eq!(&blob[4..], &[0x34, 0x12, 0xCD, 0xAB]);
    }

    #[test]
    fn add_raw_rejects_unsupported_dtype() {
        for code in [0u8, 4, 8, 12] {
            let err = BlobEncoder::new()
                .add_raw(code, vec![1], &[0; 8], ByteOrder::Little)
                .unwrap_err();
            assert!(matches!(err, EncodeError::UnsupportedDType { code: c } if c == code));
        }
    }

    #[test]
    fn add_raw_rejects_wrong_length() {
        let err = BlobEncoder::new()
            .add_raw(10, vec![2, 2], &[0; 12], ByteOrder::Little)
            .unwrap_err();
        assert!(matches!(
            err,
            EncodeError::ShapeMismatch {
                expected: 4,
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn add_raw_keeps_float16_bits() {
        let mut encoder = BlobEncoder::new();
        encoder
            .big_endian()
            .add_raw(9, vec![1], &[0x00, 0x3C], ByteOrder::Little)
            .unwrap();
        assert_eq!(encoder.records()[0].array.data, ArrayData::F16(vec![0x3C00]));
        assert_eq!(encoder.encode().unwrap(), [0xF7, 0x01, 0x00, 0x01, 0x3C, 0x00]);
    }

    #[test]
    fn dimension_limits() {
        let at_limit = ArrayRecord::new(vec![1; 128], vec![9u8]).unwrap();
        assert!(encode(&[Record::new(at_limit)], &EncodeOptions::default()).is_ok());

        let over = ArrayRecord {
            shape: vec![1; 129],
            data: vec![9u8].into(),
        };
        let err = encode(&[Record::new(over)], &EncodeOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::TooManyDimensions {
                record: 0,
                ndim: 129,
                max: 128
            }
        ));
    }

    #[test]
    fn failing_record_aborts_whole_call() {
        let good = Record::new(ArrayRecord::new(vec![1], vec![1u8]).unwrap());
        let bad = Record::new(ArrayRecord {
            shape: vec![2],
            data: vec![1u8].into(),
        });
        let err = encode(&[good, bad], &EncodeOptions::default()).unwrap_err();
        assert!(matches!(err, EncodeError::ShapeMismatch { record: 1, .. }));
    }
}

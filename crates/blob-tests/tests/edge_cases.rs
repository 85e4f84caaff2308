//! Edge cases at the limits of the header: scalars, empty arrays, the
//! 128-dimension ceiling, the 16/32-bit shape switch and oversized arrays.

use blob_decoder::{BlobDecoder, DecodeError};
use blob_encoder::{BlobEncoder, EncodeError, EncodeOptions, encode};
use blob_types::{ArrayData, ArrayRecord, Record, TypeError};
use blob_wire::{MAX_DIMS, WireError};

fn le(records: &[Record]) -> Vec<u8> {
    encode(records, &EncodeOptions::little_endian()).unwrap()
}

// ── Scalars and empty arrays ──────────────────────────────────────────────────

#[test]
fn scalar_has_no_shape_bytes() {
    let record = Record::new(ArrayRecord::scalar(vec![7u8]).unwrap());
    let blob = le(std::slice::from_ref(&record));
    assert_eq!(blob, [0x01, 0x00, 0x07]);
    assert_eq!(BlobDecoder::decode(&blob).unwrap(), vec![record]);
}

#[test]
fn scalar_needs_exactly_one_element() {
    assert!(matches!(
        ArrayRecord::scalar(vec![1u8, 2]),
        Err(TypeError::ShapeMismatch { expected: 1, actual: 2, .. })
    ));
}

#[test]
fn zero_length_dimension() {
    let record = Record::new(ArrayRecord::new(vec![3, 0], ArrayData::I32(Vec::new())).unwrap());
    let blob = le(std::slice::from_ref(&record));
    assert_eq!(blob, [0x07, 0x02, 0x03, 0x00, 0x00, 0x00]);
    assert_eq!(BlobDecoder::decode(&blob).unwrap(), vec![record]);
}

#[test]
fn empty_blob_decodes_to_nothing() {
    assert!(BlobDecoder::decode(&[]).unwrap().is_empty());
    assert!(le(&[]).is_empty());
}

// ── Dimension limits ──────────────────────────────────────────────────────────

#[test]
fn max_dims_uses_32_bit_form() {
    let record = Record::new(ArrayRecord::new(vec![1; MAX_DIMS], vec![5i16]).unwrap());
    let blob = le(std::slice::from_ref(&record));

    assert_eq!(blob[1], 0x80);
    assert_eq!(blob.len(), 2 + MAX_DIMS * 4 + 2);
    assert_eq!(BlobDecoder::decode(&blob).unwrap(), vec![record]);
}

#[test]
fn max_dims_minus_one_stays_16_bit() {
    let record = Record::new(ArrayRecord::new(vec![1; MAX_DIMS - 1], vec![5i16]).unwrap());
    let blob = le(std::slice::from_ref(&record));

    assert_eq!(blob[1], 0x7F);
    assert_eq!(blob.len(), 2 + (MAX_DIMS - 1) * 2 + 2);
}

#[test]
fn too_many_dims_rejected_by_model() {
    let err = ArrayRecord::new(vec![1; MAX_DIMS + 1], vec![0u8]).unwrap_err();
    assert!(matches!(
        err,
        TypeError::Wire(WireError::TooManyDimensions { ndim: 129, max: 128 })
    ));
}

#[test]
fn too_many_dims_rejected_by_encoder() {
    let record = Record::new(ArrayRecord {
        shape: vec![1; MAX_DIMS + 1],
        data: ArrayData::U8(vec![0]),
    });
    let err = encode(&[record], &EncodeOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        EncodeError::TooManyDimensions { record: 0, ndim: 129, max: 128 }
    ));
}

#[test]
fn dimension_beyond_u32_rejected() {
    let record = Record::new(ArrayRecord {
        shape: vec![2, 1 << 32],
        data: ArrayData::U8(Vec::new()),
    });
    let err = encode(&[record], &EncodeOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        EncodeError::DimensionTooLarge { record: 0, index: 1, size } if size == 1 << 32
    ));
}

#[test]
fn dimension_above_u16_switches_shape_width() {
    let record = Record::new(ArrayRecord::new(vec![65_536], vec![0u8; 65_536]).unwrap());
    let blob = le(std::slice::from_ref(&record));
    assert_eq!(&blob[..6], &[0x01, 0xFF, 0x00, 0x00, 0x01, 0x00]);
    assert_eq!(BlobDecoder::decode(&blob).unwrap(), vec![record]);
}

#[test]
fn dimension_at_u16_max_stays_16_bit() {
    let record = Record::new(ArrayRecord::new(vec![65_535], vec![0u8; 65_535]).unwrap());
    let blob = le(&[record]);
    assert_eq!(&blob[..4], &[0x01, 0x01, 0xFF, 0xFF]);
}

// ── Oversized and inconsistent input ──────────────────────────────────────────

#[test]
fn decode_rejects_unaddressable_array() {
    // float64 with shape [2^32-1; 3]: the byte length overflows u64.
    let mut blob = vec![0x0B, 0xFD];
    blob.extend_from_slice(&[0xFF; 12]);
    let err = BlobDecoder::decode(&blob).unwrap_err();
    assert!(matches!(err, DecodeError::ArrayTooLarge { offset: 0, ref shape } if shape.len() == 3));
}

#[test]
fn decode_reports_huge_but_addressable_array_as_truncated() {
    // uint8 with shape [2^32-1]: fits in memory arithmetic, but no data.
    let blob = [0x01, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
    let err = BlobDecoder::decode(&blob).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::TruncatedBuffer { offset: 6, needed: 4_294_967_295, available: 0 }
    ));
}

#[test]
fn encoder_rejects_shape_mismatch() {
    let record = Record::new(ArrayRecord {
        shape: vec![2, 2],
        data: ArrayData::F32(vec![1.0, 2.0, 3.0]),
    });
    let err = encode(&[record], &EncodeOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        EncodeError::ShapeMismatch { record: 0, expected: 4, actual: 3, .. }
    ));
}

#[test]
fn encoder_error_names_the_failing_record() {
    let good = Record::new(ArrayRecord::new(vec![1], vec![1u8]).unwrap());
    let bad = Record::new(ArrayRecord {
        shape: vec![5],
        data: ArrayData::U8(vec![1]),
    });
    let err = encode(&[good.clone(), good, bad], &EncodeOptions::default()).unwrap_err();
    assert!(matches!(err, EncodeError::ShapeMismatch { record: 2, .. }));
}

#[test]
fn add_raw_rejects_reserved_codes() {
    for code in [0u8, 4, 8, 12, 127] {
        let err = BlobEncoder::new()
            .add_raw(code, vec![1], &[0], blob_types::ByteOrder::Little)
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(err, EncodeError::UnsupportedDType { code: c } if c == code));
    }
}

#[test]
fn add_raw_rejects_wrong_byte_count() {
    let err = BlobEncoder::new()
        .add_raw(3, vec![2], &[0; 7], blob_types::ByteOrder::Little)
        .map(|_| ())
        .unwrap_err();
    assert!(matches!(err, EncodeError::ShapeMismatch { expected: 2, .. }));
}

#[test]
fn with_extra_needs_a_record() {
    let err = BlobEncoder::new()
        .with_extra(vec![1u8])
        .map(|_| ())
        .unwrap_err();
    assert!(matches!(err, EncodeError::InvalidExtraTarget));
}

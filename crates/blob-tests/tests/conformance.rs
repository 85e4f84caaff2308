//! Conformance tests: exact byte layouts and exact diagnostics.
//!
//! Fixtures are hex strings written out by hand from the format layout, so
//! a change to any of them is a wire-format change. Diagnostics are pinned
//! with insta inline snapshots; after a deliberate message change run
//! `cargo insta review`.

use blob_decoder::{BlobDecoder, StreamingDecoder};
use blob_encoder::{EncodeOptions, encode};
use blob_types::{ArrayData, ArrayRecord, Extra, Record};
use bytes::Bytes;
use insta::{assert_debug_snapshot, assert_snapshot};
use serde_json::json;

const FLOAT_2X3_LE: &str = "0a0202000300cdcc8c3fcdcc0c4033335340cdcc8c400000b0403333d340";
const FLOAT_2X3_BE: &str = "f602000200033f8ccccd400ccccd40533333408ccccd40b0000040d33333";
const MINMAX_EXTRA_LE: &str = "02150000007b226d696e223a312e312c226d6178223a362e367d";

fn unhex(text: &str) -> Vec<u8> {
    hex::decode(text).unwrap()
}

fn float_2x3() -> ArrayRecord {
    ArrayRecord::new(vec![2, 3], vec![1.1f32, 2.2, 3.3, 4.4, 5.5, 6.6]).unwrap()
}

fn decode_err(hex_blob: &str) -> String {
    BlobDecoder::decode(&unhex(hex_blob)).unwrap_err().to_string()
}

// ── Literal layouts ───────────────────────────────────────────────────────────

#[test]
fn float32_2x3_little_endian_without_extra() {
    let blob = encode(&[Record::new(float_2x3())], &EncodeOptions::little_endian()).unwrap();
    assert_eq!(hex::encode(&blob), FLOAT_2X3_LE);
    assert_eq!(blob.len(), 2 + 4 + 24);
}

#[test]
fn float32_2x3_little_endian_with_extra() {
    let record = Record::with_extra(float_2x3(), json!({"min": 1.1, "max": 6.6}));
    let blob = encode(&[record], &EncodeOptions::little_endian()).unwrap();
    assert_eq!(hex::encode(&blob), format!("{FLOAT_2X3_LE}{MINMAX_EXTRA_LE}"));
}

#[test]
fn float32_2x3_big_endian() {
    let blob = encode(&[Record::new(float_2x3())], &EncodeOptions::big_endian()).unwrap();
    assert_eq!(hex::encode(&blob), FLOAT_2X3_BE);
}

#[test]
fn literal_blobs_decode() {
    let plain = BlobDecoder::decode(&unhex(FLOAT_2X3_LE)).unwrap();
    assert_eq!(plain, vec![Record::new(float_2x3())]);

    let big = BlobDecoder::decode(&unhex(FLOAT_2X3_BE)).unwrap();
    assert_eq!(big, plain);

    let with_extra = BlobDecoder::decode(&unhex(&format!("{FLOAT_2X3_LE}{MINMAX_EXTRA_LE}"))).unwrap();
    assert_eq!(
        with_extra[0].extra,
        Some(Extra::Json(json!({"min": 1.1, "max": 6.6})))
    );
}

#[test]
fn explicit_no_extra_flag_ends_the_record() {
    let blob = unhex(&format!("{FLOAT_2X3_LE}00"));
    assert_eq!(BlobDecoder::decode(&blob).unwrap(), vec![Record::new(float_2x3())]);
}

#[test]
fn explicit_no_extra_flag_then_separator() {
    let blob = unhex(&format!("{FLOAT_2X3_LE}0000{FLOAT_2X3_LE}"));
    let expected = vec![Record::new(float_2x3()), Record::new(float_2x3())];
    assert_eq!(BlobDecoder::decode(&blob).unwrap(), expected);

    let chunks = blob.chunks(7).map(|c| Ok::<_, std::io::Error>(Bytes::copy_from_slice(c)));
    let decoder = StreamingDecoder::new(futures::stream::iter(chunks));
    let streamed: Vec<Record> =
        futures::executor::block_on(futures::StreamExt::collect::<Vec<_>>(decoder.into_stream()))
            .into_iter()
            .map(Result::unwrap)
            .collect();
    assert_eq!(streamed, expected);
}

#[test]
fn separator_after_flag_zero_needs_a_record() {
    assert_snapshot!(decode_err(&format!("{FLOAT_2X3_LE}0000")), @"truncated buffer at offset 32: needed 2 bytes, 0 available");
}

#[test]
fn concatenated_single_record_blobs() {
    // uint8 [2] | int16 scalar + raw extra | uint32 [1], joined by 0x00
    let blob = unhex(concat!(
        "010102000102",
        "00",
        "0600ffff0101000000aa",
        "00",
        "0301010007000000",
    ));
    let records = BlobDecoder::decode(&blob).unwrap();

    let expected = vec![
        Record::new(ArrayRecord::new(vec![2], vec![1u8, 2]).unwrap()),
        Record::with_extra(ArrayRecord::scalar(vec![-1i16]).unwrap(), vec![0xAAu8]),
        Record::new(ArrayRecord::new(vec![1], vec![7u32]).unwrap()),
    ];
    assert_eq!(records, expected);
    assert_eq!(encode(&expected, &EncodeOptions::little_endian()).unwrap(), blob);
}

#[test]
fn half_header_after_record_fails_in_both_decoders() {
    // uint8 [2], flag 0, then a lone 0x06 where a header should start
    let blob = unhex("0101020001020006");
    assert!(BlobDecoder::decode(&blob).is_err());

    let chunks = blob.iter().map(|&b| Ok::<_, std::io::Error>(Bytes::from(vec![b])));
    let mut decoder = StreamingDecoder::new(futures::stream::iter(chunks));
    let first = futures::executor::block_on(decoder.next()).unwrap().unwrap();
    assert_eq!(first.array.data, ArrayData::U8(vec![1, 2]));
    assert!(futures::executor::block_on(decoder.next()).unwrap().is_err());
}

#[test]
fn big_endian_uint16_record() {
    let records = BlobDecoder::decode(&unhex("fe0100020102abcd")).unwrap();
    assert_debug_snapshot!(records, @r"
    [
        Record {
            array: ArrayRecord {
                shape: [
                    2,
                ],
                data: U16(
                    [
                        258,
                        43981,
                    ],
                ),
            },
            extra: None,
        },
    ]
    ");
}

#[test]
fn float16_materializes_as_float32() {
    // 1.0, -2.0, +inf, smallest subnormal
    let records = BlobDecoder::decode(&unhex(concat!(
        "0901", "0400", "003c", "00c0", "007c", "0100",
    )))
    .unwrap();
    match &records[0].array.data {
        ArrayData::F32(v) => {
            assert_eq!(v[..3], [1.0, -2.0, f32::INFINITY]);
            assert_eq!(v[3], 2f32.powi(-24));
        }
        other => panic!("expected F32, got {other:?}"),
    }
}

// ── Diagnostics ───────────────────────────────────────────────────────────────

#[test]
fn zero_dtype_message() {
    assert_snapshot!(decode_err("00010100"), @"malformed header at offset 0: invalid dtype code 0 (header byte 0x00)");
}

#[test]
fn reserved_dtype_message() {
    assert_snapshot!(decode_err("f8010100"), @"malformed header at offset 0: invalid dtype code 8 (header byte 0xF8)");
}

#[test]
fn truncated_shape_message() {
    assert_snapshot!(decode_err("0a02020003"), @"truncated buffer at offset 2: needed 4 bytes, 3 available");
}

#[test]
fn reserved_extra_flag_message() {
    assert_snapshot!(decode_err("01000103"), @"invalid extra flag 3 at offset 3 (reserved, not implemented)");
}

#[test]
fn unknown_extra_flag_message() {
    assert_snapshot!(decode_err("01000109"), @"invalid extra flag 9 at offset 3");
}

#[test]
fn missing_separator_message() {
    assert_snapshot!(decode_err("0100090101000000ee010007"), @"expected record separator 0x00 at offset 9, found 0x01");
}

#[test]
fn trailing_separator_message() {
    assert_snapshot!(decode_err("0100090101000000ee00"), @"truncated buffer at offset 10: needed 2 bytes, 0 available");
}

#[test]
fn too_many_dimensions_message() {
    let record = Record::new(ArrayRecord {
        shape: vec![1; 129],
        data: ArrayData::U8(vec![0]),
    });
    let err = encode(&[record], &EncodeOptions::default()).unwrap_err();
    assert_snapshot!(err.to_string(), @"record 0: 129 dimensions exceeds the limit of 128");
}

#[test]
fn incomplete_stream_message() {
    let chunks = vec![Ok::<_, std::io::Error>(Bytes::from_static(&[0x01]))];
    let mut decoder = StreamingDecoder::new(futures::stream::iter(chunks));
    let err = futures::executor::block_on(decoder.next()).unwrap().unwrap_err();
    assert_snapshot!(err.to_string(), @"stream ended with 1 undecodable bytes");
}

#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use blob_decoder::BlobDecoder;
use blob_encoder::{encode, EncodeOptions};
use blob_types::{ArrayData, ArrayRecord, Extra, Record};
use libfuzzer_sys::fuzz_target;
use serde_json::json;

#[derive(Debug, Arbitrary)]
enum FuzzData {
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    F32(Vec<u32>),
    F64(Vec<u64>),
}

#[derive(Debug, Arbitrary)]
enum FuzzExtra {
    None,
    Bytes(Vec<u8>),
    Text(String),
    Number(i64),
}

#[derive(Debug, Arbitrary)]
struct FuzzRecord {
    data: FuzzData,
    /// Splits the element count into two dimensions when set.
    split: Option<u8>,
    extra: FuzzExtra,
}

#[derive(Debug)]
struct FuzzInput {
    records: Vec<FuzzRecord>,
    big_endian: bool,
}

impl<'a> Arbitrary<'a> for FuzzInput {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let count = u.int_in_range(0..=8)?;
        let mut records = Vec::with_capacity(count);
        for _ in 0..count {
            records.push(FuzzRecord::arbitrary(u)?);
        }
        Ok(Self {
            records,
            big_endian: bool::arbitrary(u)?,
        })
    }
}

fn build(record: FuzzRecord) -> Record {
    // Floats come in as bit patterns so NaN payloads are exercised; compare
    // through bits below.
    let data = match record.data {
        FuzzData::U8(v) => ArrayData::U8(v),
        FuzzData::U16(v) => ArrayData::U16(v),
        FuzzData::U32(v) => ArrayData::U32(v),
        FuzzData::I8(v) => ArrayData::I8(v),
        FuzzData::I16(v) => ArrayData::I16(v),
        FuzzData::I32(v) => ArrayData::I32(v),
        FuzzData::F32(v) => ArrayData::F32(v.into_iter().map(f32::from_bits).collect()),
        FuzzData::F64(v) => ArrayData::F64(v.into_iter().map(f64::from_bits).collect()),
    };

    let len = data.len() as u64;
    let shape = match record.split {
        Some(rows) if rows > 0 && len % u64::from(rows) == 0 => vec![u64::from(rows), len / u64::from(rows)],
        _ => vec![len],
    };

    let array = ArrayRecord::new(shape, data).expect("shape matches element count");
    let extra = match record.extra {
        FuzzExtra::None => None,
        FuzzExtra::Bytes(b) => Some(Extra::Bytes(b)),
        FuzzExtra::Text(s) => Some(Extra::Json(json!({ "text": s }))),
        FuzzExtra::Number(n) => Some(Extra::Json(json!(n))),
    };
    Record { array, extra }
}

fn bits(data: &ArrayData) -> Vec<u64> {
    match data {
        ArrayData::F32(v) => v.iter().map(|x| u64::from(x.to_bits())).collect(),
        ArrayData::F64(v) => v.iter().map(|x| x.to_bits()).collect(),
        _ => Vec::new(),
    }
}

// Fuzz target: encode → decode roundtrip for arbitrary record batches.
//
// Verifies that every record comes back with the same shape, dtype, element
// bits and extra payload, in both byte orders.
fuzz_target!(|input: FuzzInput| {
    let records: Vec<Record> = input.records.into_iter().map(build).collect();
    let options = if input.big_endian {
        EncodeOptions::big_endian()
    } else {
        EncodeOptions::little_endian()
    };

    let blob = encode(&records, &options).expect("valid records must encode");
    let decoded = BlobDecoder::decode(&blob).expect("encoded blob must decode");

    assert_eq!(decoded.len(), records.len());
    for (got, want) in decoded.iter().zip(&records) {
        assert_eq!(got.array.shape, want.array.shape);
        assert_eq!(got.array.dtype(), want.array.dtype());
        assert_eq!(got.extra, want.extra);
        match &want.array.data {
            ArrayData::F32(_) | ArrayData::F64(_) => assert_eq!(bits(&got.array.data), bits(&want.array.data)),
            other => assert_eq!(&got.array.data, other),
        }
    }
});

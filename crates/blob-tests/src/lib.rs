//! Shared fixtures for the integration tests and benches.

use blob_types::{ArrayData, ArrayRecord, Extra, Record};
use bytes::Bytes;
use serde_json::json;

/// A small batch touching every dtype, both extra kinds, a scalar and a
/// record whose shape needs the 32-bit form.
#[must_use]
pub fn sample_records() -> Vec<Record> {
  vec![
    Record::with_extra(
      array(vec![2, 3], vec![1.1f32, 2.2, 3.3, 4.4, 5.5, 6.6]),
      json!({"min": 1.1, "max": 6.6}),
    ),
    Record::new(array(vec![4], vec![0u8, 1, 254, 255])),
    Record::new(array(vec![2, 2], vec![0u16, 1, 0x1234, u16::MAX])),
    Record::with_extra(array(vec![1], vec![u32::MAX]), Extra::Bytes(vec![0xDE, 0xAD])),
    Record::new(array(vec![3], vec![i8::MIN, 0, i8::MAX])),
    Record::new(array(vec![1, 1, 2], vec![i16::MIN, i16::MAX])),
    Record::with_extra(
      array(vec![], vec![-42i32]),
      json!({"label": "scalar", "tags": ["a", "b"]}),
    ),
    Record::new(array(vec![70_000], vec![0.25f64; 70_000])),
    Record::new(array(vec![0, 5], ArrayData::F32(Vec::new()))),
  ]
}

/// One float32 record of `len` elements with a JSON extra.
#[must_use]
pub fn float_record(len: usize) -> Record {
  #[allow(clippy::cast_precision_loss)]
  let data: Vec<f32> = (0..len).map(|i| i as f32 * 0.5).collect();
  Record::with_extra(
    array(vec![len as u64], data),
    json!({"len": len}),
  )
}

/// Split `blob` into chunks of the given sizes, cycling through `sizes`.
/// Zero sizes are treated as one.
#[must_use]
pub fn split_by(blob: &[u8], sizes: &[usize]) -> Vec<Bytes> {
  let mut out = Vec::new();
  let mut rest = blob;
  let mut sizes = sizes.iter().copied().map(|s| s.max(1)).cycle();
  while !rest.is_empty() {
    let size = sizes.next().unwrap_or(rest.len()).min(rest.len());
    let (head, tail) = rest.split_at(size);
    out.push(Bytes::copy_from_slice(head));
    rest = tail;
  }
  out
}

fn array(shape: Vec<u64>, data: impl Into<ArrayData>) -> ArrayRecord {
  ArrayRecord {
    shape,
    data: data.into(),
  }
}

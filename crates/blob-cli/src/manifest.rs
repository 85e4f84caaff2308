//! JSON manifest shared by `blob encode` (input) and `blob decode` (output).
//!
//! ```json
//! {
//!   "records": [
//!     { "dtype": "float32", "shape": [2, 3],
//!       "data": [1.1, 2.2, 3.3, 4.4, 5.5, 6.6],
//!       "extra": { "min": 1.1, "max": 6.6 } },
//!     { "dtype": "uint8", "shape": [2], "data": [7, 8],
//!       "extra_bytes": "deadbeef" },
//!     { "dtype": "int32", "shape": [], "data": [-4] }
//!   ]
//! }
//! ```
//!
//! ```text
//! ┌─────────────┬──────────────────────────────────────────────────────┐
//! │ Key         │ Meaning                                              │
//! ├─────────────┼──────────────────────────────────────────────────────┤
//! │ dtype       │ uint8 | uint16 | uint32 | int8 | int16 | int32 |     │
//! │             │ float16 | float32 | float64                          │
//! │ shape       │ dimension sizes; [] is a 0-d scalar                  │
//! │ data        │ flat row-major element list                          │
//! │ extra       │ optional JSON extra payload                          │
//! │ extra_bytes │ optional raw extra payload, hex encoded              │
//! └─────────────┴──────────────────────────────────────────────────────┘
//! ```
//!
//! `float16` data is given as raw half-precision bit patterns (0..=65535).
//! Float values that are not finite are written as `null` and read back as
//! NaN.

use anyhow::{Result, anyhow, bail};
use blob_types::{ArrayData, ArrayRecord, DType, Extra, Record};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub records: Vec<ManifestRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ManifestRecord {
    pub dtype: String,
    pub shape: Vec<u64>,
    pub data: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_bytes: Option<String>,
}

impl Manifest {
    pub fn from_records(records: &[Record]) -> Self {
        Self {
            records: records.iter().map(ManifestRecord::from_record).collect(),
        }
    }
}

impl ManifestRecord {
    pub fn from_record(record: &Record) -> Self {
        let array = &record.array;
        let (extra, extra_bytes) = match &record.extra {
            None => (None, None),
            Some(Extra::Json(value)) => (Some(value.clone()), None),
            Some(Extra::Bytes(bytes)) => (None, Some(hex::encode(bytes))),
        };
        Self {
            dtype: array.dtype().name().to_string(),
            shape: array.shape.clone(),
            data: data_values(&array.data),
            extra,
            extra_bytes,
        }
    }

    /// Build the record this entry describes.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown dtype, an element that does not fit
    /// the dtype, a shape that disagrees with the element count, both extra
    /// keys at once, or invalid hex in `extra_bytes`.
    pub fn to_record(&self) -> Result<Record> {
        let dtype = DType::from_name(&self.dtype)?;
        let data = parse_data(dtype, &self.data)?;
        let array = ArrayRecord::new(self.shape.clone(), data)?;

        let extra = match (&self.extra, &self.extra_bytes) {
            (Some(_), Some(_)) => bail!("`extra` and `extra_bytes` are mutually exclusive"),
            (Some(value), None) => Some(Extra::Json(value.clone())),
            (None, Some(text)) => Some(Extra::Bytes(
                hex::decode(text).map_err(|e| anyhow!("invalid extra_bytes hex: {e}"))?,
            )),
            (None, None) => None,
        };
        Ok(Record { array, extra })
    }
}

// ── Element conversion ────────────────────────────────────────────────────────

fn data_values(data: &ArrayData) -> Vec<Value> {
    match data {
        ArrayData::U8(v) => v.iter().map(|&x| Value::from(x)).collect(),
        ArrayData::U16(v) | ArrayData::F16(v) => v.iter().map(|&x| Value::from(x)).collect(),
        ArrayData::U32(v) => v.iter().map(|&x| Value::from(x)).collect(),
        ArrayData::I8(v) => v.iter().map(|&x| Value::from(x)).collect(),
        ArrayData::I16(v) => v.iter().map(|&x| Value::from(x)).collect(),
        ArrayData::I32(v) => v.iter().map(|&x| Value::from(x)).collect(),
        ArrayData::F32(v) => v.iter().map(|&x| float_value(f64::from(x))).collect(),
        ArrayData::F64(v) => v.iter().map(|&x| float_value(x)).collect(),
    }
}

fn float_value(x: f64) -> Value {
    serde_json::Number::from_f64(x).map_or(Value::Null, Value::Number)
}

fn parse_data(dtype: DType, values: &[Value]) -> Result<ArrayData> {
    Ok(match dtype {
        DType::Uint8 => ArrayData::U8(collect(dtype, values, unsigned)?),
        DType::Uint16 => ArrayData::U16(collect(dtype, values, unsigned)?),
        DType::Uint32 => ArrayData::U32(collect(dtype, values, unsigned)?),
        DType::Int8 => ArrayData::I8(collect(dtype, values, signed)?),
        DType::Int16 => ArrayData::I16(collect(dtype, values, signed)?),
        DType::Int32 => ArrayData::I32(collect(dtype, values, signed)?),
        DType::Float16 => ArrayData::F16(collect(dtype, values, unsigned)?),
        #[allow(clippy::cast_possible_truncation)]
        DType::Float32 => ArrayData::F32(collect(dtype, values, |v| float(v).map(|x| x as f32))?),
        DType::Float64 => ArrayData::F64(collect(dtype, values, float)?),
    })
}

fn collect<T>(dtype: DType, values: &[Value], convert: impl Fn(&Value) -> Option<T>) -> Result<Vec<T>> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| convert(v).ok_or_else(|| anyhow!("element {i} ({v}) is not a valid {dtype}")))
        .collect()
}

fn unsigned<T: TryFrom<u64>>(value: &Value) -> Option<T> {
    value.as_u64().and_then(|n| T::try_from(n).ok())
}

fn signed<T: TryFrom<i64>>(value: &Value) -> Option<T> {
    value.as_i64().and_then(|n| T::try_from(n).ok())
}

fn float(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(f64::NAN),
        other => other.as_f64(),
    }
}

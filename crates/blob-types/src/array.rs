use blob_wire::half::f16_bits_to_f32;
use blob_wire::{ByteOrder, DType, MAX_DIMS, WireError};

use crate::error::TypeError;

/// Typed element storage, one variant per supported dtype.
///
/// `F16` holds raw half-precision bit patterns and only appears on the
/// encode side: decoding a float16 record widens every element to `f32`
/// and yields `F32`, so the reported dtype of a decoded float16 array is
/// `Float32`.
#[derive(Clone, Debug, PartialEq)]
pub enum ArrayData {
  U8(Vec<u8>),
  U16(Vec<u16>),
  U32(Vec<u32>),
  I8(Vec<i8>),
  I16(Vec<i16>),
  I32(Vec<i32>),
  F16(Vec<u16>),
  F32(Vec<f32>),
  F64(Vec<f64>),
}

// ── Element codecs ────────────────────────────────────────────────────
//
// Every multi-byte element type goes through the same two helpers; the
// per-type difference is only which to_*_bytes / from_*_bytes pair is
// handed in.

fn write_elements<T: Copy, const N: usize>(
  values: &[T],
  order: ByteOrder,
  out: &mut Vec<u8>,
  le: fn(T) -> [u8; N],
  be: fn(T) -> [u8; N],
) {
  out.reserve(values.len() * N);
  let encode = if order.is_little() { le } else { be };
  for &value in values {
    out.extend_from_slice(&encode(value));
  }
}

fn read_elements<T, const N: usize>(
  bytes: &[u8],
  order: ByteOrder,
  le: fn([u8; N]) -> T,
  be: fn([u8; N]) -> T,
) -> Vec<T> {
  let decode = if order.is_little() { le } else { be };
  bytes
    .chunks_exact(N)
    .map(|chunk| {
      let mut raw = [0u8; N];
      raw.copy_from_slice(chunk);
      decode(raw)
    })
    .collect()
}

#[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
impl ArrayData {
  /// The dtype tag of this storage.
  #[must_use]
  pub fn dtype(&self) -> DType {
    match self {
      Self::U8(_) => DType::Uint8,
      Self::U16(_) => DType::Uint16,
      Self::U32(_) => DType::Uint32,
      Self::I8(_) => DType::Int8,
      Self::I16(_) => DType::Int16,
      Self::I32(_) => DType::Int32,
      Self::F16(_) => DType::Float16,
      Self::F32(_) => DType::Float32,
      Self::F64(_) => DType::Float64,
    }
  }

  /// Number of elements.
  #[must_use]
  pub fn len(&self) -> usize {
    match self {
      Self::U8(v) => v.len(),
      Self::U16(v) | Self::F16(v) => v.len(),
      Self::U32(v) => v.len(),
      Self::I8(v) => v.len(),
      Self::I16(v) => v.len(),
      Self::I32(v) => v.len(),
      Self::F32(v) => v.len(),
      Self::F64(v) => v.len(),
    }
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Size of the serialized data block in bytes.
  #[must_use]
  pub fn byte_len(&self) -> usize {
    self.len() * self.dtype().size()
  }

  /// Append the elements in `order`.
  pub fn write_to(&self, order: ByteOrder, out: &mut Vec<u8>) {
    match self {
      Self::U8(v) => out.extend_from_slice(v),
      Self::I8(v) => out.extend(v.iter().map(|&x| x as u8)),
      Self::U16(v) | Self::F16(v) => {
        write_elements(v, order, out, u16::to_le_bytes, u16::to_be_bytes);
      }
      Self::U32(v) => write_elements(v, order, out, u32::to_le_bytes, u32::to_be_bytes),
      Self::I16(v) => write_elements(v, order, out, i16::to_le_bytes, i16::to_be_bytes),
      Self::I32(v) => write_elements(v, order, out, i32::to_le_bytes, i32::to_be_bytes),
      Self::F32(v) => write_elements(v, order, out, f32::to_le_bytes, f32::to_be_bytes),
      Self::F64(v) => write_elements(v, order, out, f64::to_le_bytes, f64::to_be_bytes),
    }
  }

  /// Reinterpret raw element bytes stored in `order` without widening.
  ///
  /// Unlike [`read_from`](Self::read_from), float16 stays as
  /// [`ArrayData::F16`] bit patterns. Any trailing partial element is
  /// ignored.
  #[must_use]
  pub fn from_raw(dtype: DType, order: ByteOrder, bytes: &[u8]) -> Self {
    match dtype {
      DType::Float16 => Self::F16(read_elements(bytes, order, u16::from_le_bytes, u16::from_be_bytes)),
      other => Self::read_from(other, order, bytes),
    }
  }

  /// Decode a data block of `dtype` elements stored in `order`.
  ///
  /// `bytes` must hold a whole number of elements; any trailing partial
  /// element is ignored. Float16 input materializes as [`ArrayData::F32`].
  #[must_use]
  pub fn read_from(dtype: DType, order: ByteOrder, bytes: &[u8]) -> Self {
    match dtype {
      DType::Uint8 => Self::U8(bytes.to_vec()),
      DType::Int8 => Self::I8(bytes.iter().map(|&b| b as i8).collect()),
      DType::Uint16 => Self::U16(read_elements(bytes, order, u16::from_le_bytes, u16::from_be_bytes)),
      DType::Uint32 => Self::U32(read_elements(bytes, order, u32::from_le_bytes, u32::from_be_bytes)),
      DType::Int16 => Self::I16(read_elements(bytes, order, i16::from_le_bytes, i16::from_be_bytes)),
      DType::Int32 => Self::I32(read_elements(bytes, order, i32::from_le_bytes, i32::from_be_bytes)),
      DType::Float16 => {
        let bits = read_elements(bytes, order, u16::from_le_bytes, u16::from_be_bytes);
        Self::F32(bits.into_iter().map(f16_bits_to_f32).collect())
      }
      DType::Float32 => Self::F32(read_elements(bytes, order, f32::from_le_bytes, f32::from_be_bytes)),
      DType::Float64 => Self::F64(read_elements(bytes, order, f64::from_le_bytes, f64::from_be_bytes)),
    }
  }
}

macro_rules! impl_from_vec {
  ($($ty:ty => $variant:ident),+ $(,)?) => {
    $(
      impl From<Vec<$ty>> for ArrayData {
        fn from(values: Vec<$ty>) -> Self {
          Self::$variant(values)
        }
      }
    )+
  };
}

// u16 maps to Uint16; half-precision data must be wrapped in F16 explicitly.
impl_from_vec! {
  u8 => U8,
  u16 => U16,
  u32 => U32,
  i8 => I8,
  i16 => I16,
  i32 => I32,
  f32 => F32,
  f64 => F64,
}

/// Product of all dimensions, or `None` on overflow. An empty shape is a
/// scalar and has one element.
#[must_use]
pub fn shape_product(shape: &[u64]) -> Option<u64> {
  shape.iter().try_fold(1u64, |acc, &size| acc.checked_mul(size))
}

/// One typed n-dimensional array.
///
/// Elements are stored flat in row-major order; `shape` only describes
/// how to index them. The constructor enforces `data.len() ==
/// product(shape)` and the dimension-count limit.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayRecord {
  pub shape: Vec<u64>,
  pub data: ArrayData,
}

impl ArrayRecord {
  /// Build an array, checking the element count against the shape.
  ///
  /// # Errors
  ///
  /// - [`TypeError::Wire`] wrapping `TooManyDimensions` if the shape has
  ///   more than 128 entries.
  /// - [`TypeError::ShapeOverflow`] if the product of the shape overflows.
  /// - [`TypeError::ShapeMismatch`] if the element count differs.
  pub fn new(shape: Vec<u64>, data: impl Into<ArrayData>) -> Result<Self, TypeError> {
    let record = Self {
      shape,
      data: data.into(),
    };
    record.validate()?;
    Ok(record)
  }

  /// A zero-dimensional array holding exactly one element.
  ///
  /// # Errors
  ///
  /// Returns [`TypeError::ShapeMismatch`] unless `data` has one element.
  pub fn scalar(data: impl Into<ArrayData>) -> Result<Self, TypeError> {
    Self::new(Vec::new(), data)
  }

  /// Check the record invariants. The encoder calls this again before
  /// writing, since the fields are public.
  ///
  /// # Errors
  ///
  /// Same conditions as [`ArrayRecord::new`].
  pub fn validate(&self) -> Result<(), TypeError> {
    if self.shape.len() > MAX_DIMS {
      return Err(WireError::TooManyDimensions {
        ndim: self.shape.len(),
        max: MAX_DIMS,
      }
      .into());
    }

    let expected = self.element_count()?;
    if usize::try_from(expected).ok() != Some(self.data.len()) {
      return Err(TypeError::ShapeMismatch {
        shape: self.shape.clone(),
        expected,
        actual: self.data.len(),
      });
    }
    Ok(())
  }

  /// `product(shape)`.
  ///
  /// # Errors
  ///
  /// Returns [`TypeError::ShapeOverflow`] if the product overflows `u64`.
  pub fn element_count(&self) -> Result<u64, TypeError> {
    shape_product(&self.shape).ok_or_else(|| TypeError::ShapeOverflow {
      shape: self.shape.clone(),
    })
  }

  #[must_use]
  pub fn dtype(&self) -> DType {
    self.data.dtype()
  }

  #[must_use]
  pub fn ndim(&self) -> usize {
    self.shape.len()
  }
}

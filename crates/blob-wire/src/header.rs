use crate::byte_order::ByteOrder;
use crate::dtype::DType;
use crate::error::WireError;

/// Maximum number of dimensions a record may declare.
pub const MAX_DIMS: usize = 128;

/// Size of the fixed part of every record header.
pub const HEADER_SIZE: usize = 2;

/// Byte written between consecutive records.
///
/// After a record without extra, this same byte is read back as extra
/// flag 0, so it is never doubled.
pub const RECORD_SEPARATOR: u8 = 0x00;

/// Width of each shape entry, selected by the sign of header byte 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeWidth {
    /// 16-bit entries; header byte 1 is `+n`.
    U16,
    /// 32-bit entries; header byte 1 is `-n`.
    U32,
}

impl ShapeWidth {
    #[must_use]
    pub fn bytes(self) -> usize {
        match self {
            Self::U16 => 2,
            Self::U32 => 4,
        }
    }
}

/// The two signed bytes that open every record.
///
/// ```text
/// ┌────────┬──────┬──────────────────────────────────────────────┐
/// │ Offset │ Type │ Meaning                                      │
/// ├────────┼──────┼──────────────────────────────────────────────┤
/// │ 0      │ i8   │ |v| = dtype code, sign: + little / - big     │
/// │ 1      │ i8   │ v > 0: n dims, u16 each                      │
/// │        │      │ v < 0: -v dims, u32 each                     │
/// │        │      │ v = 0: zero dims (scalar), no shape bytes    │
/// └────────┴──────┴──────────────────────────────────────────────┘
/// ```
///
/// A positive byte 1 tops out at 127, so a 128-dimensional record always
/// uses the 32-bit form (`-128`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordHeader {
    pub byte_order: ByteOrder,
    pub dtype: DType,
    pub shape_width: ShapeWidth,
    pub ndim: usize,
}

impl RecordHeader {
    /// Build the header for a shape, choosing the narrowest shape width.
    ///
    /// # Errors
    ///
    /// - [`WireError::TooManyDimensions`] if `shape` has more than
    ///   [`MAX_DIMS`] entries.
    /// - [`WireError::DimensionTooLarge`] if any entry is `>= 2^32`.
    pub fn for_shape(dtype: DType, shape: &[u64], byte_order: ByteOrder) -> Result<Self, WireError> {
        if shape.len() > MAX_DIMS {
            return Err(WireError::TooManyDimensions {
                ndim: shape.len(),
                max: MAX_DIMS,
            });
        }

        if let Some((index, &size)) = shape
            .iter()
            .enumerate()
            .find(|&(_, &size)| size > u64::from(u32::MAX))
        {
            return Err(WireError::DimensionTooLarge { index, size });
        }

        let fits_u16 = shape.iter().all(|&size| size <= u64::from(u16::MAX));
        let shape_width = if fits_u16 && shape.len() <= i8::MAX as usize {
            ShapeWidth::U16
        } else {
            ShapeWidth::U32
        };

        Ok(Self {
            byte_order,
            dtype,
            shape_width,
            ndim: shape.len(),
        })
    }

    /// Serialize the two header bytes.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        // dtype codes are at most 11, ndim at most 128; both fit after the
        // checks in for_shape.
        let dtype_byte = self.byte_order.sign() * self.dtype.code() as i8;
        let ndim = self.ndim as i16;
        let dims: i16 = match self.shape_width {
            ShapeWidth::U16 => ndim,
            ShapeWidth::U32 => -ndim,
        };
        [dtype_byte as u8, dims as i8 as u8]
    }

    /// Parse a header from the first two bytes of `buf`.
    ///
    /// # Errors
    ///
    /// - [`WireError::UnexpectedEof`] if fewer than two bytes are available.
    /// - [`WireError::InvalidDType`] if byte 0 is zero or names a reserved
    ///   code.
    #[allow(clippy::cast_possible_wrap)]
    pub fn read_from(buf: &[u8]) -> Result<Self, WireError> {
        if buf.len() < HEADER_SIZE {
            return Err(WireError::UnexpectedEof { offset: buf.len() });
        }

        let dtype_byte = buf[0] as i8;
        let byte_order = if dtype_byte < 0 {
            ByteOrder::Big
        } else {
            ByteOrder::Little
        };
        // unsigned_abs of i8::MIN is 128, which from_code rejects like any
        // other out-of-range code.
        let dtype = DType::from_code(dtype_byte.unsigned_abs()).map_err(|_| {
            WireError::InvalidDType {
                code: dtype_byte.unsigned_abs(),
                raw: buf[0],
            }
        })?;

        let dims_byte = buf[1] as i8;
        let shape_width = if dims_byte < 0 {
            ShapeWidth::U32
        } else {
            ShapeWidth::U16
        };

        Ok(Self {
            byte_order,
            dtype,
            shape_width,
            ndim: usize::from(dims_byte.unsigned_abs()),
        })
    }

    /// Number of bytes occupied by the shape entries that follow the header.
    #[must_use]
    pub fn shape_len(&self) -> usize {
        self.ndim * self.shape_width.bytes()
    }

    /// Append the shape entries in this header's width and byte order.
    ///
    /// The shape must be the one this header was built from.
    #[allow(clippy::cast_possible_truncation)]
    pub fn write_shape(&self, shape: &[u64], out: &mut Vec<u8>) {
        debug_assert_eq!(shape.len(), self.ndim);
        for &size in shape {
            match self.shape_width {
                ShapeWidth::U16 => self.byte_order.write_u16(size as u16, out),
                ShapeWidth::U32 => self.byte_order.write_u32(size as u32, out),
            }
        }
    }

    /// Decode exactly [`shape_len`](Self::shape_len) bytes of shape entries.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnexpectedEof`] if `buf` is shorter than
    /// `shape_len()`.
    pub fn read_shape(&self, buf: &[u8]) -> Result<Vec<u64>, WireError> {
        if buf.len() < self.shape_len() {
            return Err(WireError::UnexpectedEof { offset: buf.len() });
        }

        let width = self.shape_width.bytes();
        let shape = buf[..self.shape_len()]
            .chunks_exact(width)
            .map(|entry| match self.shape_width {
                ShapeWidth::U16 => u64::from(self.byte_order.read_u16([entry[0], entry[1]])),
                ShapeWidth::U32 => u64::from(
                    self.byte_order
                        .read_u32([entry[0], entry[1], entry[2], entry[3]]),
                ),
            })
            .collect();
        Ok(shape)
    }
}

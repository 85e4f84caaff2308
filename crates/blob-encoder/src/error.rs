use blob_types::TypeError;
use blob_wire::WireError;

/// Errors that can occur while encoding a blob.
///
/// Every record-level variant carries the zero-based index of the
/// offending record so a caller encoding a long sequence can find it.
///
/// ```text
///   EncodeError
///   ├── TooManyDimensions    ← more than 128 dimensions
///   ├── DimensionTooLarge    ← a dimension >= 2^32
///   ├── UnsupportedDType     ← dtype code outside the 9 supported
///   ├── ShapeMismatch        ← element count != product(shape)
///   ├── ExtraTooLarge        ← extra payload longer than u32::MAX
///   ├── InvalidExtraTarget   ← with_extra called before any record
///   └── Type(TypeError)      ← JSON serialization, shape overflow
/// ```
///
/// No partial output is returned on error; the whole call fails.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("record {record}: {ndim} dimensions exceeds the limit of {max}")]
    TooManyDimensions {
        record: usize,
        ndim: usize,
        max: usize,
    },

    #[error("record {record}: dimension {index} has size {size}, which does not fit in 32 bits")]
    DimensionTooLarge {
        record: usize,
        index: usize,
        size: u64,
    },

    #[error("unsupported dtype code {code}")]
    UnsupportedDType { code: u8 },

    #[error("record {record}: shape {shape:?} needs {expected} elements, data has {actual}")]
    ShapeMismatch {
        record: usize,
        shape: Vec<u64>,
        expected: u64,
        actual: usize,
    },

    #[error("record {record}: extra payload is {len} bytes, limit is 4294967295")]
    ExtraTooLarge { record: usize, len: usize },

    #[error("with_extra called but no records have been added yet")]
    InvalidExtraTarget,

    #[error("record {record}: {source}")]
    Type {
        record: usize,
        #[source]
        source: TypeError,
    },
}

impl EncodeError {
    /// Attach a record index to a lower-level error, lifting the limit
    /// violations into their dedicated variants.
    pub(crate) fn from_type(record: usize, err: TypeError) -> Self {
        match err {
            TypeError::Wire(wire) => Self::from_wire(record, wire),
            TypeError::ShapeMismatch {
                shape,
                expected,
                actual,
            } => Self::ShapeMismatch {
                record,
                shape,
                expected,
                actual,
            },
            source => Self::Type { record, source },
        }
    }

    pub(crate) fn from_wire(record: usize, err: WireError) -> Self {
        match err {
            WireError::TooManyDimensions { ndim, max } => Self::TooManyDimensions { record, ndim, max },
            WireError::DimensionTooLarge { index, size } => Self::DimensionTooLarge {
                record,
                index,
                size,
            },
            WireError::InvalidDType { code, .. } => Self::UnsupportedDType { code },
            other => Self::Type {
                record,
                source: TypeError::Wire(other),
            },
        }
    }
}

/// Byte-level errors raised while reading or writing record headers.
///
/// Everything here is about the first few bytes of a record: the signed
/// dtype byte, the signed dimension-count byte, and the width of each
/// shape entry. Higher layers wrap these with the offset at which the
/// header started.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Header byte 0 named a dtype code outside the supported table.
    ///
    /// Codes 0, 4, 8 and anything from 12 upward are reserved. The raw
    /// signed byte is kept so a wrong sign and a wrong magnitude can be
    /// told apart when debugging.
    #[error("invalid dtype code {code} (header byte {raw:#04X})")]
    InvalidDType { code: u8, raw: u8 },

    /// A dtype was requested by name that the format cannot carry
    /// (for example `int64`).
    #[error("unsupported dtype {name:?}")]
    UnsupportedDType { name: String },

    /// More dimensions than the header can declare.
    #[error("{ndim} dimensions exceeds the limit of {max}")]
    TooManyDimensions { ndim: usize, max: usize },

    /// A shape entry does not fit in an unsigned 32-bit integer.
    #[error("dimension {index} has size {size}, which does not fit in 32 bits")]
    DimensionTooLarge { index: usize, size: u64 },

    /// Extra-flag byte was not 0, 1 or 2. Flag 3 is reserved for a
    /// structured binary encoding that has not been defined.
    #[error("invalid extra flag {flag}{}", reserved_note(.flag))]
    InvalidExtraFlag { flag: u8 },

    /// Input ended before a complete header could be read.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },
}

fn reserved_note(flag: &u8) -> &'static str {
    if *flag == crate::extra_flag::RESERVED_STRUCTURED_FLAG {
        " (reserved for structured binary extras, not implemented)"
    } else {
        ""
    }
}

use crate::error::WireError;

/// Flag value reserved for a future structured binary extra encoding.
pub const RESERVED_STRUCTURED_FLAG: u8 = 3;

/// The byte that may follow a record's data block.
///
/// ```text
///   0 → no extra; record ends after this byte
///   1 → raw bytes:  u32 length + bytes
///   2 → JSON text:  u32 length + UTF-8 bytes
///   3 → reserved (rejected)
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtraFlag {
    None,
    Bytes,
    Json,
}

impl ExtraFlag {
    #[must_use]
    pub fn to_wire_byte(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Bytes => 1,
            Self::Json => 2,
        }
    }

    /// # Errors
    ///
    /// Returns [`WireError::InvalidExtraFlag`] for every value other than
    /// 0, 1 and 2. Flag 3 is rejected rather than skipped.
    pub fn from_wire_byte(value: u8) -> Result<Self, WireError> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Bytes),
            2 => Ok(Self::Json),
            flag => Err(WireError::InvalidExtraFlag { flag }),
        }
    }

    /// Whether a 4-byte length and payload follow the flag.
    #[must_use]
    pub fn has_payload(self) -> bool {
        self != Self::None
    }
}

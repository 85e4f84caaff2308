/// Byte order of a single record's shape entries, data elements and
/// extra-length prefix.
///
/// The order is chosen once per encode call and written into the sign of
/// header byte 0, so a decoder never needs to know the producer's host.
/// [`ByteOrder::native`] is a `const fn` resolved at compile time; callers
/// pass it explicitly rather than reading it from shared state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    /// The byte order of the target this crate was compiled for.
    #[must_use]
    pub const fn native() -> Self {
        if cfg!(target_endian = "little") {
            Self::Little
        } else {
            Self::Big
        }
    }

    #[must_use]
    pub fn is_little(self) -> bool {
        self == Self::Little
    }

    /// Header sign convention: positive means little-endian.
    #[must_use]
    pub(crate) fn sign(self) -> i8 {
        match self {
            Self::Little => 1,
            Self::Big => -1,
        }
    }

    pub fn write_u16(self, value: u16, out: &mut Vec<u8>) {
        match self {
            Self::Little => out.extend_from_slice(&value.to_le_bytes()),
            Self::Big => out.extend_from_slice(&value.to_be_bytes()),
        }
    }

    pub fn write_u32(self, value: u32, out: &mut Vec<u8>) {
        match self {
            Self::Little => out.extend_from_slice(&value.to_le_bytes()),
            Self::Big => out.extend_from_slice(&value.to_be_bytes()),
        }
    }

    #[must_use]
    pub fn read_u16(self, bytes: [u8; 2]) -> u16 {
        match self {
            Self::Little => u16::from_le_bytes(bytes),
            Self::Big => u16::from_be_bytes(bytes),
        }
    }

    #[must_use]
    pub fn read_u32(self, bytes: [u8; 4]) -> u32 {
        match self {
            Self::Little => u32::from_le_bytes(bytes),
            Self::Big => u32::from_be_bytes(bytes),
        }
    }
}

impl Default for ByteOrder {
    fn default() -> Self {
        Self::native()
    }
}

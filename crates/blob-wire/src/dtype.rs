use crate::error::WireError;

/// Element types a record can carry.
///
/// ```text
/// ┌──────┬──────────┬───────┐
/// │ Code │ DType    │ Width │
/// ├──────┼──────────┼───────┤
/// │ 1    │ Uint8    │ 1     │
/// │ 2    │ Uint16   │ 2     │
/// │ 3    │ Uint32   │ 4     │
/// │ 5    │ Int8     │ 1     │
/// │ 6    │ Int16    │ 2     │
/// │ 7    │ Int32    │ 4     │
/// │ 9    │ Float16  │ 2     │
/// │ 10   │ Float32  │ 4     │
/// │ 11   │ Float64  │ 8     │
/// └──────┴──────────┴───────┘
/// ```
///
/// Codes 0, 4, 8 and 12+ are reserved. 4 and 8 are the 64-bit integer
/// slots, which have no dtype.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DType {
    Uint8,
    Uint16,
    Uint32,
    Int8,
    Int16,
    Int32,
    Float16,
    Float32,
    Float64,
}

/// Code-indexed lookup table. `None` marks a reserved code.
const BY_CODE: [Option<DType>; 12] = [
    None,
    Some(DType::Uint8),
    Some(DType::Uint16),
    Some(DType::Uint32),
    None,
    Some(DType::Int8),
    Some(DType::Int16),
    Some(DType::Int32),
    None,
    Some(DType::Float16),
    Some(DType::Float32),
    Some(DType::Float64),
];

impl DType {
    /// All supported dtypes in code order.
    pub const ALL: [DType; 9] = [
        Self::Uint8,
        Self::Uint16,
        Self::Uint32,
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Float16,
        Self::Float32,
        Self::Float64,
    ];

    /// Wire code, i.e. the magnitude of header byte 0.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Uint8 => 1,
            Self::Uint16 => 2,
            Self::Uint32 => 3,
            Self::Int8 => 5,
            Self::Int16 => 6,
            Self::Int32 => 7,
            Self::Float16 => 9,
            Self::Float32 => 10,
            Self::Float64 => 11,
        }
    }

    /// Width of one element in bytes.
    #[must_use]
    pub fn size(self) -> usize {
        match self {
            Self::Uint8 | Self::Int8 => 1,
            Self::Uint16 | Self::Int16 | Self::Float16 => 2,
            Self::Uint32 | Self::Int32 | Self::Float32 => 4,
            Self::Float64 => 8,
        }
    }

    /// Lowercase name, matching the names peers use for the same types.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Float16 => "float16",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
        }
    }

    /// Look up a dtype by wire code.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::InvalidDType`] for reserved or out-of-range codes.
    pub fn from_code(code: u8) -> Result<Self, WireError> {
        BY_CODE
            .get(usize::from(code))
            .copied()
            .flatten()
            .ok_or(WireError::InvalidDType { code, raw: code })
    }

    /// Look up a dtype by its lowercase name.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnsupportedDType`] for any name outside the
    /// nine supported types, including `int64`, `uint64` and `bool`.
    pub fn from_name(name: &str) -> Result<Self, WireError> {
        Self::ALL
            .into_iter()
            .find(|dtype| dtype.name() == name)
            .ok_or_else(|| WireError::UnsupportedDType {
                name: name.to_string(),
            })
    }
}

impl std::fmt::Display for DType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

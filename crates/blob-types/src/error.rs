use blob_wire::WireError;

/// Errors raised while building or (de)serializing record model values.
///
/// ```text
/// ┌──────────────────────────────────────────────────────┐
/// │ TypeError (this crate)                               │
/// │   ├── ShapeMismatch   element count ≠ product(shape) │
/// │   ├── ShapeOverflow   product(shape) overflows u64   │
/// │   ├── Json            extra payload JSON failure     │
/// │   └── Wire            header-level limits            │
/// └──────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
  /// The data buffer does not hold exactly `product(shape)` elements.
  #[error("shape {shape:?} needs {expected} elements, data has {actual}")]
  ShapeMismatch {
    shape: Vec<u64>,
    expected: u64,
    actual: usize,
  },

  /// Multiplying the dimensions together overflowed.
  #[error("shape {shape:?} has too many elements to address")]
  ShapeOverflow { shape: Vec<u64> },

  /// A JSON extra payload could not be serialized or parsed.
  #[error("invalid JSON extra payload: {0}")]
  Json(#[from] serde_json::Error),

  /// Dimension-count and dimension-size limits come from the wire layer.
  #[error(transparent)]
  Wire(#[from] WireError),
}

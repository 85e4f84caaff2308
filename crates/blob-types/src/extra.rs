use blob_wire::ExtraFlag;

use crate::error::TypeError;

/// Side metadata attached to a record.
///
/// Absence is modelled as `Option<Extra>` on [`Record`](crate::Record),
/// so this enum only covers the two payload-carrying forms.
#[derive(Clone, Debug, PartialEq)]
pub enum Extra {
  /// Opaque bytes, passed through untouched.
  Bytes(Vec<u8>),
  /// A JSON value, written as compact UTF-8 text with keys in insertion
  /// order.
  Json(serde_json::Value),
}

impl Extra {
  #[must_use]
  pub fn flag(&self) -> ExtraFlag {
    match self {
      Self::Bytes(_) => ExtraFlag::Bytes,
      Self::Json(_) => ExtraFlag::Json,
    }
  }

  /// The payload bytes that follow the flag and length prefix.
  ///
  /// # Errors
  ///
  /// Returns [`TypeError::Json`] if the value cannot be serialized.
  pub fn to_payload(&self) -> Result<Vec<u8>, TypeError> {
    match self {
      Self::Bytes(bytes) => Ok(bytes.clone()),
      Self::Json(value) => Ok(serde_json::to_vec(value)?),
    }
  }

  /// Rebuild an extra from its flag and payload bytes. Flag 0 yields
  /// `None`.
  ///
  /// # Errors
  ///
  /// Returns [`TypeError::Json`] if a JSON payload is not valid UTF-8 JSON.
  pub fn from_payload(flag: ExtraFlag, payload: &[u8]) -> Result<Option<Self>, TypeError> {
    match flag {
      ExtraFlag::None => Ok(None),
      ExtraFlag::Bytes => Ok(Some(Self::Bytes(payload.to_vec()))),
      ExtraFlag::Json => Ok(Some(Self::Json(serde_json::from_slice(payload)?))),
    }
  }
}

impl From<serde_json::Value> for Extra {
  fn from(value: serde_json::Value) -> Self {
    Self::Json(value)
  }
}

impl From<Vec<u8>> for Extra {
  fn from(bytes: Vec<u8>) -> Self {
    Self::Bytes(bytes)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn json_is_compact_and_ordered() {
    let extra = Extra::Json(json!({"min": 1.1, "max": 6.6}));
    let payload = extra.to_payload().unwrap();
    assert_eq!(payload, br#"{"min":1.1,"max":6.6}"#);
    assert_eq!(payload.len(), 21);
  }

  #[test]
  fn json_payload_parses_back() {
    let extra = Extra::Json(json!({"z": [1, 2], "a": null}));
    let payload = extra.to_payload().unwrap();
    let parsed = Extra::from_payload(ExtraFlag::Json, &payload).unwrap();
    assert_eq!(parsed, Some(extra));
  }

  #[test]
  fn bytes_pass_through() {
    let parsed = Extra::from_payload(ExtraFlag::Bytes, &[0, 159, 146, 150]).unwrap();
    assert_eq!(parsed, Some(Extra::Bytes(vec![0, 159, 146, 150])));
  }

  #[test]
  fn invalid_json_is_an_error() {
    let err = Extra::from_payload(ExtraFlag::Json, b"{not json").unwrap_err();
    assert!(matches!(err, TypeError::Json(_)));
  }

  #[test]
  fn no_flag_means_no_extra() {
    assert_eq!(Extra::from_payload(ExtraFlag::None, b"").unwrap(), None);
  }
}

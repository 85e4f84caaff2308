use crate::array::ArrayRecord;
use crate::extra::Extra;

/// One array plus its optional extra payload: the unit a blob carries.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
  pub array: ArrayRecord,
  pub extra: Option<Extra>,
}

impl Record {
  #[must_use]
  pub fn new(array: ArrayRecord) -> Self {
    Self { array, extra: None }
  }

  #[must_use]
  pub fn with_extra(array: ArrayRecord, extra: impl Into<Extra>) -> Self {
    Self {
      array,
      extra: Some(extra.into()),
    }
  }
}

impl From<ArrayRecord> for Record {
  fn from(array: ArrayRecord) -> Self {
    Self::new(array)
  }
}

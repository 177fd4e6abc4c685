use crate::engine::Value;
use crate::error::ConversionError;
use crate::rows::Record;

/// Result of `peer count`. The command emits a single integer column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeerCount {
  pub count: i64,
}

impl Record for PeerCount {
  fn put(&mut self, _column: &str, value: Value<'_>) -> Result<(), ConversionError> {
    if let Value::Integer(v) = value {
      self.count = v;
    }
    Ok(())
  }
}

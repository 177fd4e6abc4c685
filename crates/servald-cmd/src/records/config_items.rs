use std::collections::BTreeMap;

use crate::engine::Value;
use crate::error::{ConversionError, ConversionReason};
use crate::rows::Record;

/// Result of `config get <pattern>`: every column is a configuration item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigItems {
  pub values: BTreeMap<String, String>,
}

impl ConfigItems {
  #[must_use]
  pub fn get(&self, name: &str) -> Option<&str> {
    self.values.get(name).map(String::as_str)
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }
}

impl Record for ConfigItems {
  fn put(&mut self, column: &str, value: Value<'_>) -> Result<(), ConversionError> {
    let text = match value {
      Value::Text(v) => v.to_string(),
      Value::Binary(v) => String::from_utf8(v.to_vec())
        .map_err(|_| ConversionError::new(column, ConversionReason::InvalidText))?,
      Value::Integer(_) => return Ok(()),
    };
    self.values.insert(column.to_string(), text);
    Ok(())
  }
}

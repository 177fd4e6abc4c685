use crate::coerce::identifier;
use crate::engine::Value;
use crate::error::ConversionError;
use crate::ids::SubscriberId;
use crate::rows::Record;

/// An identity from the keyring, a reverse lookup, or the peer list.
///
/// `id peers` rows only ever carry `sid`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
  pub did: Option<String>,
  pub name: Option<String>,
  pub sid: Option<SubscriberId>,
}

impl Record for Identity {
  fn put(&mut self, column: &str, value: Value<'_>) -> Result<(), ConversionError> {
    match (column, value) {
      ("did", Value::Text(v)) => self.did = Some(v.to_string()),
      ("name", Value::Text(v)) => self.name = Some(v.to_string()),
      ("sid", Value::Text(_) | Value::Binary(_)) => {
        if let Some(sid) = identifier(column, value)? {
          self.sid = Some(sid);
        }
      }
      _ => {}
    }
    Ok(())
  }
}

/// One answer to a `dna lookup`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupResult {
  pub sid: Option<SubscriberId>,
  pub did: Option<String>,
  pub name: Option<String>,
  pub uri: Option<String>,
}

impl Record for LookupResult {
  fn put(&mut self, column: &str, value: Value<'_>) -> Result<(), ConversionError> {
    match (column, value) {
      ("did", Value::Text(v)) => self.did = Some(v.to_string()),
      ("name", Value::Text(v)) => self.name = Some(v.to_string()),
      ("uri", Value::Text(v)) => self.uri = Some(v.to_string()),
      ("sid", Value::Text(_) | Value::Binary(_)) => {
        if let Some(sid) = identifier(column, value)? {
          self.sid = Some(sid);
        }
      }
      _ => {}
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::ConversionReason;
  use crate::ids::IdError;

  #[test]
  fn sid_arrives_as_hex_or_blob() -> Result<(), ConversionError> {
    let raw = [0xAB_u8; 32];
    let mut from_blob = Identity::default();
    from_blob.put_binary("sid", &raw)?;
    let mut from_hex = Identity::default();
    from_hex.put_text("sid", &"ab".repeat(32))?;
    assert_eq!(from_blob, from_hex);
    assert_eq!(from_blob.sid.map(|s| *s.as_bytes()), Some(raw));
    Ok(())
  }

  #[test]
  fn malformed_sid_is_reported_and_left_unset() {
    let mut id = Identity::default();
    let err = id.put_text("sid", "not-hex").expect_err("invalid hex");
    assert!(matches!(err.reason, ConversionReason::Id(IdError::InvalidHex { .. })));
    let err = id.put_binary("sid", &[1, 2]).expect_err("short blob");
    assert!(matches!(err.reason, ConversionReason::Id(IdError::InvalidLength { .. })));
    assert_eq!(id.sid, None);
  }

  #[test]
  fn empty_name_differs_from_missing_name() -> Result<(), ConversionError> {
    let mut id = Identity::default();
    id.put_text("did", "5551234")?;
    id.put_text("name", "")?;
    assert_eq!(id.name.as_deref(), Some(""));
    assert_eq!(Identity::default().name, None);
    Ok(())
  }

  #[test]
  fn lookup_keeps_uri() -> Result<(), ConversionError> {
    let mut r = LookupResult::default();
    r.put_text("did", "5551234")?;
    r.put_text("name", "Alice")?;
    r.put_text("uri", "sid://ABC/5551234")?;
    r.put_text("unknown", "x")?;
    assert_eq!(r.uri.as_deref(), Some("sid://ABC/5551234"));
    assert_eq!(r.sid, None);
    Ok(())
  }
}

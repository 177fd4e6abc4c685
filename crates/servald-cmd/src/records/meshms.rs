use crate::coerce::identifier;
use crate::engine::Value;
use crate::error::ConversionError;
use crate::ids::SubscriberId;
use crate::rows::Record;

/// One row of `meshms list conversations`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
  pub id: i64,
  pub recipient: Option<SubscriberId>,
  pub read: Option<String>,
  pub last_message: i64,
  pub read_offset: i64,
}

impl Record for Conversation {
  fn put(&mut self, column: &str, value: Value<'_>) -> Result<(), ConversionError> {
    match (column, value) {
      ("_id", Value::Integer(v)) => self.id = v,
      ("recipient", Value::Binary(_) | Value::Text(_)) => {
        if let Some(sid) = identifier(column, value)? {
          self.recipient = Some(sid);
        }
      }
      ("read", Value::Text(v)) => self.read = Some(v.to_string()),
      ("last_message", Value::Integer(v)) => self.last_message = v,
      ("read_offset", Value::Integer(v)) => self.read_offset = v,
      _ => {}
    }
    Ok(())
  }
}

/// One row of `meshms list messages`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
  pub id: i64,
  pub offset: i64,
  /// Direction/state marker as printed by servald (`>`, `<`, `ACK`, ...).
  pub kind: Option<String>,
  pub message: Option<String>,
}

impl Record for Message {
  fn put(&mut self, column: &str, value: Value<'_>) -> Result<(), ConversionError> {
    match (column, value) {
      ("_id", Value::Integer(v)) => self.id = v,
      ("offset", Value::Integer(v)) => self.offset = v,
      ("type", Value::Text(v)) => self.kind = Some(v.to_string()),
      ("message", Value::Text(v)) => self.message = Some(v.to_string()),
      _ => {}
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn conversation_from_columns() -> Result<(), ConversionError> {
    let mut c = Conversation::default();
    c.put_integer("_id", 3)?;
    c.put_binary("recipient", &[0x42; 32])?;
    c.put_text("read", "unread")?;
    c.put_integer("last_message", 120)?;
    c.put_integer("read_offset", 80)?;
    assert_eq!(c.id, 3);
    assert_eq!(c.recipient.map(|r| r.as_bytes()[0]), Some(0x42));
    assert_eq!(c.read.as_deref(), Some("unread"));
    assert_eq!((c.last_message, c.read_offset), (120, 80));
    Ok(())
  }

  #[test]
  fn short_recipient_is_a_diagnostic() {
    let mut c = Conversation::default();
    assert!(c.put_binary("recipient", &[0x42; 31]).is_err());
    assert_eq!(c.recipient, None);
  }

  #[test]
  fn message_type_and_text() -> Result<(), ConversionError> {
    let mut m = Message::default();
    m.put_integer("_id", 1)?;
    m.put_integer("offset", 64)?;
    m.put_text("type", ">")?;
    m.put_text("message", "hello")?;
    m.put_integer("timestamp", 5)?;
    assert_eq!(
      m,
      Message {
        id: 1,
        offset: 64,
        kind: Some(">".into()),
        message: Some("hello".into()),
      }
    );
    Ok(())
  }
}

use crate::coerce::{narrow_i32, narrow_u16, parse_number};
use crate::engine::Value;
use crate::error::ConversionError;
use crate::rows::Record;

/// Server state reported by `start`, `stop` and `status`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerStatus {
  pub pid: i32,
  pub tries: i32,
  pub instance_path: Option<String>,
  pub status: Option<String>,
  pub mdp_inet_port: u16,
  pub http_port: u16,
}

impl Record for ServerStatus {
  fn put(&mut self, column: &str, value: Value<'_>) -> Result<(), ConversionError> {
    match (column, value) {
      ("pid", Value::Integer(v)) => self.pid = narrow_i32(v),
      ("tries", Value::Integer(v)) => self.tries = narrow_i32(v),
      ("instancepath", Value::Text(v)) => self.instance_path = Some(v.to_string()),
      ("status", Value::Text(v)) => self.status = Some(v.to_string()),
      ("mdp_inet_port", Value::Text(v)) => {
        self.mdp_inet_port = narrow_u16(parse_number(column, v)?);
      }
      ("mdp_inet_port", Value::Integer(v)) => self.mdp_inet_port = narrow_u16(v),
      ("http_port", Value::Text(v)) => {
        self.http_port = narrow_u16(parse_number(column, v)?);
      }
      ("http_port", Value::Integer(v)) => self.http_port = narrow_u16(v),
      _ => {}
    }
    Ok(())
  }
}

//! Scalar conversions shared by the record decoders.

use std::str::FromStr;

use crate::engine::Value;
use crate::error::{ConversionError, ConversionReason};
use crate::ids::FixedId;

/// Parses a servald configuration boolean.
///
/// Absent or empty values yield `default`. `off`, `no`, `false` and `0`
/// (ignoring ASCII case) are false; any other non-empty text is true.
#[must_use]
pub fn parse_bool(value: Option<&str>, default: bool) -> bool {
  match value {
    None | Some("") => default,
    Some(v) => !["off", "no", "false", "0"]
      .iter()
      .any(|f| f.eq_ignore_ascii_case(v)),
  }
}

/// Narrows an engine integer to `i32`, keeping the low 32 bits.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn narrow_i32(value: i64) -> i32 {
  value as i32
}

/// Narrows an engine integer to `u16`, keeping the low 16 bits.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn narrow_u16(value: i64) -> u16 {
  value as u16
}

/// Parses decimal text from `column` into `T`.
pub fn parse_number<T: FromStr>(column: &str, text: &str) -> Result<T, ConversionError> {
  text
    .trim()
    .parse()
    .map_err(|_| ConversionError::new(column, ConversionReason::InvalidInteger(text.to_string())))
}

/// Builds an identifier from either hex text or raw bytes.
///
/// Empty text is malformed like any other bad hex. Integers are not
/// identifiers and yield `Ok(None)`.
pub fn identifier<I: FixedId>(column: &str, value: Value<'_>) -> Result<Option<I>, ConversionError> {
  let parsed = match value {
    Value::Integer(_) => return Ok(None),
    Value::Text(text) => I::from_hex(text),
    Value::Binary(bytes) => I::from_binary(bytes),
  };
  parsed
    .map(Some)
    .map_err(|e| ConversionError::new(column, e))
}

/// Like [`identifier`], but empty text means "no identifier" and yields `Ok(None)`.
///
/// Manifest rows leave id columns empty when a bundle has no such id.
pub fn optional_identifier<I: FixedId>(
  column: &str,
  value: Value<'_>,
) -> Result<Option<I>, ConversionError> {
  match value {
    Value::Text("") => Ok(None),
    other => identifier(column, other),
  }
}

//! The boundary between this crate and the servald command interpreter.
//!
//! An [`Engine`] runs one argument vector and reports its output through a
//! [`ResultSink`] while the call is in progress. Output comes in two shapes:
//!
//! - tabular result sets: `start_result_set(n)`, `set_column_name(i, name)` for
//!   each column, then values positionally, row after row;
//! - key/value fields: `field_name(name)` followed by exactly one value.
//!
//! Sinks never see row boundaries directly. Consumers that care about rows
//! (see [`crate::rows`]) derive them from the announced column count.

/// Status returned by the engine when the invocation itself failed.
pub const STATUS_ERROR: i32 = 255;

/// Conventional success status.
pub const STATUS_OK: i32 = 0;

/// A single loosely typed column value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value<'a> {
  Text(&'a str),
  Binary(&'a [u8]),
  Integer(i64),
}

impl Value<'_> {
  /// Short name of the value's type, used in diagnostics.
  #[must_use]
  pub fn kind(&self) -> &'static str {
    match self {
      Value::Text(_) => "text",
      Value::Binary(_) => "binary",
      Value::Integer(_) => "integer",
    }
  }
}

/// Receives the output of one engine invocation.
///
/// Only `set_column_name`, `field_name` and `put_value` are required; the
/// result-set bracketing events default to no-ops.
pub trait ResultSink {
  /// A tabular result set with `columns` columns begins.
  fn start_result_set(&mut self, _columns: usize) {}

  /// Names column `column` of the current result set.
  fn set_column_name(&mut self, column: usize, name: &str);

  /// Names the single value that follows (key/value output).
  fn field_name(&mut self, name: &str);

  fn put_value(&mut self, value: Value<'_>);

  /// Total number of rows in the current result set, when the engine knows it.
  fn total_row_count(&mut self, _rows: u64) {}

  fn end_result_set(&mut self) {}

  fn put_text(&mut self, value: &str) {
    self.put_value(Value::Text(value));
  }

  fn put_binary(&mut self, value: &[u8]) {
    self.put_value(Value::Binary(value));
  }

  fn put_integer(&mut self, value: i64) {
    self.put_value(Value::Integer(value));
  }
}

/// A command interpreter that can run one argument vector at a time.
///
/// Implementations are not expected to be re-entrant; [`crate::invoker::ServalD`]
/// guarantees at most one call in flight per engine.
pub trait Engine {
  /// Runs `args` (argv[1..] of a servald command line), delivering output to
  /// `sink`, and returns the exit status.
  fn raw_command(&mut self, sink: &mut dyn ResultSink, args: &[String]) -> i32;
}

impl<F> Engine for F
where
  F: FnMut(&mut dyn ResultSink, &[String]) -> i32,
{
  fn raw_command(&mut self, sink: &mut dyn ResultSink, args: &[String]) -> i32 {
    self(sink, args)
  }
}

/// Sink that discards everything. Used for commands that produce no rows.
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl ResultSink for Discard {
  fn set_column_name(&mut self, _column: usize, _name: &str) {}

  fn field_name(&mut self, _name: &str) {}

  fn put_value(&mut self, _value: Value<'_>) {}
}

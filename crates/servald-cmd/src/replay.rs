//! An [`Engine`] that answers from a scripted transcript.
//!
//! Transcripts are TOML:
//!
//! ```toml
//! [[command]]
//! args = ["start"]
//! fields = [{ name = "pid", value = 1234 }, { name = "status", value = "running" }]
//!
//! [[command]]
//! args = ["id", "peers"]
//! columns = ["sid"]
//! rows = [[{ hex = "0123..." }]]
//! ```
//!
//! Strings are text, integers are integers, and `{ hex = "..." }` is a blob.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::warn;
use serde::Deserialize;

use crate::engine::{Engine, ResultSink, STATUS_ERROR, Value};

/// One column value in a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawCell")]
pub enum Cell {
  Text(String),
  Binary(Vec<u8>),
  Integer(i64),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCell {
  Integer(i64),
  Text(String),
  Binary { hex: String },
}

impl TryFrom<RawCell> for Cell {
  type Error = String;

  fn try_from(raw: RawCell) -> Result<Self, Self::Error> {
    Ok(match raw {
      RawCell::Integer(v) => Cell::Integer(v),
      RawCell::Text(v) => Cell::Text(v),
      RawCell::Binary { hex } => {
        Cell::Binary(hex::decode(&hex).map_err(|e| format!("invalid hex blob {hex:?}: {e}"))?)
      }
    })
  }
}

impl Cell {
  fn as_value(&self) -> Value<'_> {
    match self {
      Cell::Text(v) => Value::Text(v),
      Cell::Binary(v) => Value::Binary(v),
      Cell::Integer(v) => Value::Integer(*v),
    }
  }
}

impl From<&str> for Cell {
  fn from(v: &str) -> Self {
    Cell::Text(v.to_string())
  }
}

impl From<String> for Cell {
  fn from(v: String) -> Self {
    Cell::Text(v)
  }
}

impl From<i64> for Cell {
  fn from(v: i64) -> Self {
    Cell::Integer(v)
  }
}

impl From<i32> for Cell {
  fn from(v: i32) -> Self {
    Cell::Integer(i64::from(v))
  }
}

impl From<Vec<u8>> for Cell {
  fn from(v: Vec<u8>) -> Self {
    Cell::Binary(v)
  }
}

impl From<&[u8]> for Cell {
  fn from(v: &[u8]) -> Self {
    Cell::Binary(v.to_vec())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Field {
  pub name: String,
  pub value: Cell,
}

/// The scripted answer to one argument vector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Exchange {
  pub args: Vec<String>,
  #[serde(default)]
  pub status: i32,
  /// Key/value output, emitted before any result set.
  #[serde(default)]
  pub fields: Vec<Field>,
  #[serde(default)]
  pub columns: Vec<String>,
  #[serde(default)]
  pub rows: Vec<Vec<Cell>>,
}

impl Exchange {
  pub fn new<I, S>(args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      args: args.into_iter().map(Into::into).collect(),
      ..Self::default()
    }
  }

  #[must_use]
  pub fn status(mut self, status: i32) -> Self {
    self.status = status;
    self
  }

  #[must_use]
  pub fn field(mut self, name: &str, value: impl Into<Cell>) -> Self {
    self.fields.push(Field {
      name: name.to_string(),
      value: value.into(),
    });
    self
  }

  #[must_use]
  pub fn columns<I, S>(mut self, columns: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.columns = columns.into_iter().map(Into::into).collect();
    self
  }

  #[must_use]
  pub fn row(mut self, cells: Vec<Cell>) -> Self {
    self.rows.push(cells);
    self
  }

  fn emit(&self, sink: &mut dyn ResultSink) {
    for field in &self.fields {
      sink.field_name(&field.name);
      sink.put_value(field.value.as_value());
    }
    if self.columns.is_empty() {
      return;
    }
    sink.start_result_set(self.columns.len());
    for (i, name) in self.columns.iter().enumerate() {
      sink.set_column_name(i, name);
    }
    for row in &self.rows {
      for cell in row {
        sink.put_value(cell.as_value());
      }
    }
    sink.total_row_count(self.rows.len() as u64);
    sink.end_result_set();
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Transcript {
  #[serde(default, rename = "command")]
  pub commands: Vec<Exchange>,
}

impl Transcript {
  pub fn from_toml(text: &str) -> Result<Self> {
    toml::from_str(text).context("invalid transcript")
  }

  pub fn load(path: &Path) -> Result<Self> {
    let data =
      fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    Self::from_toml(&data).with_context(|| format!("in {}", path.display()))
  }
}

/// Replays scripted exchanges. Vectors without a script answer [`STATUS_ERROR`].
#[derive(Debug, Clone, Default)]
pub struct ReplayEngine {
  exchanges: Vec<Exchange>,
  received: Vec<Vec<String>>,
}

impl ReplayEngine {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn from_transcript(transcript: Transcript) -> Self {
    Self {
      exchanges: transcript.commands,
      received: Vec::new(),
    }
  }

  pub fn load(path: &Path) -> Result<Self> {
    Ok(Self::from_transcript(Transcript::load(path)?))
  }

  #[must_use]
  pub fn respond(mut self, exchange: Exchange) -> Self {
    self.exchanges.push(exchange);
    self
  }

  /// Every argument vector seen so far, in call order.
  #[must_use]
  pub fn received(&self) -> &[Vec<String>] {
    &self.received
  }
}

impl Engine for ReplayEngine {
  fn raw_command(&mut self, sink: &mut dyn ResultSink, args: &[String]) -> i32 {
    self.received.push(args.to_vec());
    match self.exchanges.iter().find(|e| e.args == args) {
      Some(exchange) => {
        exchange.emit(sink);
        exchange.status
      }
      None => {
        warn!("No scripted answer for {}", shell_words::join(args));
        STATUS_ERROR
      }
    }
  }
}

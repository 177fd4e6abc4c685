//! Folding engine output into typed records.
//!
//! A [`Record`] consumes name-keyed column values. [`RecordSink`] feeds a
//! single record from everything the engine emits; [`RowAggregator`] detects
//! row boundaries in tabular output and builds one fresh record per row, either
//! collecting them or handing each to a callback as soon as it completes.

use log::{debug, warn};
use serde::Deserialize;

use crate::engine::{ResultSink, Value};
use crate::error::ConversionError;

/// A typed accumulator for one row of command output.
///
/// Implementations match on the column name and value type they know and
/// ignore everything else. A failed conversion leaves the field untouched and
/// is reported through the returned error.
pub trait Record {
  fn put(&mut self, column: &str, value: Value<'_>) -> Result<(), ConversionError>;

  fn put_text(&mut self, column: &str, value: &str) -> Result<(), ConversionError> {
    self.put(column, Value::Text(value))
  }

  fn put_binary(&mut self, column: &str, value: &[u8]) -> Result<(), ConversionError> {
    self.put(column, Value::Binary(value))
  }

  fn put_integer(&mut self, column: &str, value: i64) -> Result<(), ConversionError> {
    self.put(column, Value::Integer(value))
  }
}

/// What to do with a row when one of its columns fails to convert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodePolicy {
  /// Keep the row with the failed fields unset; failures ride along as diagnostics.
  #[default]
  Lenient,
  /// Drop the whole row from delivery.
  AbortRow,
}

/// A completed record together with the conversions that failed while building it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row<T> {
  pub record: T,
  pub diagnostics: Vec<ConversionError>,
}

impl<T> Row<T> {
  fn new(record: T) -> Self {
    Self {
      record,
      diagnostics: Vec::new(),
    }
  }

  #[must_use]
  pub fn is_clean(&self) -> bool {
    self.diagnostics.is_empty()
  }

  pub fn into_record(self) -> T {
    self.record
  }

  fn put(&mut self, column: &str, value: Value<'_>)
  where
    T: Record,
  {
    if let Err(err) = self.record.put(column, value) {
      warn!("Dropping {} value: {err}", value.kind());
      self.diagnostics.push(err);
    }
  }
}

/// Tracks which column the next positional value belongs to.
#[derive(Debug, Default)]
struct ColumnCursor {
  names: Vec<String>,
  next: usize,
  field: Option<String>,
}

/// Where the cursor placed one value.
enum Slot {
  /// A key/value field.
  Field(String),
  /// A positional cell of a tabular result set.
  Cell {
    name: String,
    opens_row: bool,
    closes_row: bool,
  },
  /// A value with no column to go to.
  Orphan,
}

impl ColumnCursor {
  fn start(&mut self, columns: usize) {
    self.names = vec![String::new(); columns];
    self.next = 0;
  }

  fn name(&mut self, column: usize, name: &str) {
    if column >= self.names.len() {
      self.names.resize(column + 1, String::new());
    }
    self.names[column] = name.to_string();
  }

  fn field(&mut self, name: &str) {
    self.field = Some(name.to_string());
  }

  fn advance(&mut self) -> Slot {
    if let Some(name) = self.field.take() {
      return Slot::Field(name);
    }
    if self.names.is_empty() {
      return Slot::Orphan;
    }
    let opens_row = self.next == 0;
    let name = self.names[self.next].clone();
    self.next += 1;
    let closes_row = self.next == self.names.len();
    if closes_row {
      self.next = 0;
    }
    Slot::Cell {
      name,
      opens_row,
      closes_row,
    }
  }

  fn in_row(&self) -> bool {
    self.next != 0
  }

  fn end(&mut self) {
    self.names.clear();
    self.next = 0;
    self.field = None;
  }
}

/// Feeds one pre-existing record from the whole output of a command.
///
/// Meant for commands that emit at most one row; later rows overwrite
/// earlier fields.
#[derive(Debug)]
pub struct RecordSink<T> {
  row: Row<T>,
  cursor: ColumnCursor,
}

impl<T: Record> RecordSink<T> {
  pub fn new(record: T) -> Self {
    Self {
      row: Row::new(record),
      cursor: ColumnCursor::default(),
    }
  }

  pub fn into_row(self) -> Row<T> {
    self.row
  }
}

impl<T: Record> ResultSink for RecordSink<T> {
  fn start_result_set(&mut self, columns: usize) {
    self.cursor.start(columns);
  }

  fn set_column_name(&mut self, column: usize, name: &str) {
    self.cursor.name(column, name);
  }

  fn field_name(&mut self, name: &str) {
    self.cursor.field(name);
  }

  fn put_value(&mut self, value: Value<'_>) {
    match self.cursor.advance() {
      Slot::Field(name) | Slot::Cell { name, .. } => self.row.put(&name, value),
      Slot::Orphan => debug!("Ignoring unnamed {} value", value.kind()),
    }
  }

  fn end_result_set(&mut self) {
    self.cursor.end();
  }
}

enum Delivery<'h, T> {
  Collect(Vec<Row<T>>),
  Forward(&'h mut dyn FnMut(Row<T>)),
}

/// What a [`RowAggregator`] produced once the invocation is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collected<T> {
  /// Rows in emission order. Always empty in forwarding mode.
  pub rows: Vec<Row<T>>,
  /// Rows handed to the caller (collected or forwarded).
  pub delivered: usize,
  /// Rows withheld by [`DecodePolicy::AbortRow`].
  pub rejected: usize,
}

/// Turns a stream of column events into one record per row.
///
/// A row opens with the first value of a result set's column cycle and
/// completes when every announced column has received a value. Key/value
/// fields outside a result set accumulate into a single row that completes
/// at the next result set boundary or when the aggregator finishes.
pub struct RowAggregator<'h, T, F> {
  factory: F,
  delivery: Delivery<'h, T>,
  policy: DecodePolicy,
  cursor: ColumnCursor,
  current: Option<Row<T>>,
  delivered: usize,
  rejected: usize,
}

impl<'h, T, F> RowAggregator<'h, T, F>
where
  T: Record,
  F: FnMut() -> T,
{
  /// Collects completed records into an ordered list.
  pub fn collect(factory: F, policy: DecodePolicy) -> Self {
    Self::with_delivery(factory, policy, Delivery::Collect(Vec::new()))
  }

  /// Hands every completed record to `handler` as soon as its row ends.
  pub fn forward(factory: F, policy: DecodePolicy, handler: &'h mut dyn FnMut(Row<T>)) -> Self {
    Self::with_delivery(factory, policy, Delivery::Forward(handler))
  }

  fn with_delivery(factory: F, policy: DecodePolicy, delivery: Delivery<'h, T>) -> Self {
    Self {
      factory,
      delivery,
      policy,
      cursor: ColumnCursor::default(),
      current: None,
      delivered: 0,
      rejected: 0,
    }
  }

  fn current(&mut self) -> &mut Row<T> {
    let factory = &mut self.factory;
    self.current.get_or_insert_with(|| Row::new(factory()))
  }

  fn complete_row(&mut self) {
    let Some(row) = self.current.take() else {
      return;
    };
    if self.policy == DecodePolicy::AbortRow && !row.is_clean() {
      warn!(
        "Rejecting row with {} conversion failure(s)",
        row.diagnostics.len()
      );
      self.rejected += 1;
      return;
    }
    self.delivered += 1;
    match &mut self.delivery {
      Delivery::Collect(rows) => rows.push(row),
      Delivery::Forward(handler) => (*handler)(row),
    }
  }

  /// Completes any row still open and reports what was produced.
  pub fn finish(mut self) -> Collected<T> {
    if self.cursor.in_row() {
      debug!("Result set ended inside a row; delivering it incomplete");
    }
    self.complete_row();
    let rows = match self.delivery {
      Delivery::Collect(rows) => rows,
      Delivery::Forward(_) => Vec::new(),
    };
    Collected {
      rows,
      delivered: self.delivered,
      rejected: self.rejected,
    }
  }
}

impl<T, F> ResultSink for RowAggregator<'_, T, F>
where
  T: Record,
  F: FnMut() -> T,
{
  fn start_result_set(&mut self, columns: usize) {
    self.complete_row();
    self.cursor.start(columns);
  }

  fn set_column_name(&mut self, column: usize, name: &str) {
    self.cursor.name(column, name);
  }

  fn field_name(&mut self, name: &str) {
    self.cursor.field(name);
  }

  fn put_value(&mut self, value: Value<'_>) {
    match self.cursor.advance() {
      Slot::Field(name) => self.current().put(&name, value),
      Slot::Cell {
        name,
        opens_row,
        closes_row,
      } => {
        if opens_row {
          self.complete_row();
        }
        self.current().put(&name, value);
        if closes_row {
          self.complete_row();
        }
      }
      Slot::Orphan => debug!("Ignoring unnamed {} value", value.kind()),
    }
  }

  fn end_result_set(&mut self) {
    self.complete_row();
    self.cursor.end();
  }
}

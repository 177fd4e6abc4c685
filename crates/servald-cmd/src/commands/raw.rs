use anyhow::Result;

use crate::config::AppContext;
use crate::engine::{ResultSink, Value};
use crate::utils::log::t;

/// Prints every sink event on its own line as it happens.
#[derive(Debug, Default)]
struct EventPrinter {
  lines: Vec<String>,
  echo: bool,
}

impl EventPrinter {
  fn emit(&mut self, line: String) {
    if self.echo {
      anstream::println!("{line}");
    }
    self.lines.push(line);
  }
}

fn describe(value: Value<'_>) -> String {
  match value {
    Value::Text(v) => format!("text {v:?}"),
    Value::Binary(v) => format!("binary {}", hex::encode_upper(v)),
    Value::Integer(v) => format!("integer {v}"),
  }
}

impl ResultSink for EventPrinter {
  fn start_result_set(&mut self, columns: usize) {
    self.emit(format!("start_result_set {columns}"));
  }

  fn set_column_name(&mut self, column: usize, name: &str) {
    self.emit(format!("column {column} {}", t::name(name)));
  }

  fn field_name(&mut self, name: &str) {
    self.emit(format!("field {}", t::name(name)));
  }

  fn put_value(&mut self, value: Value<'_>) {
    self.emit(describe(value));
  }

  fn total_row_count(&mut self, rows: u64) {
    self.emit(format!("total_row_count {rows}"));
  }

  fn end_result_set(&mut self) {
    self.emit("end_result_set".to_string());
  }
}

pub fn run(ctx: &AppContext, args: Vec<String>) -> Result<()> {
  let mut printer = EventPrinter {
    echo: true,
    ..EventPrinter::default()
  };
  let result = ctx.servald.run_into(&mut printer, args)?;
  anstream::println!("status {}", result.last_status);
  Ok(())
}

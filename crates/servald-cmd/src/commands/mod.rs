pub mod config;
pub mod dna;
pub mod keyring;
pub mod meshms;
pub mod peers;
pub mod raw;
pub mod rhizome;
pub mod server;

use crate::error::ConversionError;
use crate::log_warn;
use crate::rows::Row;

/// Report the columns of a record that failed to convert.
fn warn_diagnostics(diagnostics: &[ConversionError]) {
  for diagnostic in diagnostics {
    log_warn!("warning: {diagnostic}");
  }
}

/// Turn rows into table lines, reporting diagnostics as they are met.
fn table_rows<T>(rows: Vec<Row<T>>, cells: impl Fn(&T) -> Vec<String>) -> Vec<Vec<String>> {
  rows
    .into_iter()
    .map(|row| {
      warn_diagnostics(&row.diagnostics);
      cells(&row.record)
    })
    .collect()
}

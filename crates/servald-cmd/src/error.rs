use thiserror::Error;

use crate::ids::IdError;

/// Failures surfaced by command invocations.
#[derive(Debug, Error)]
pub enum Error {
  /// The engine answered with [`crate::engine::STATUS_ERROR`].
  #[error("command \"{}\" returned an error", shell_words::join(.args))]
  EngineFailure { args: Vec<String> },

  /// A value could not be converted where the caller asked for a typed answer.
  #[error(transparent)]
  Conversion(#[from] ConversionError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A column value that could not be folded into its record field.
///
/// These never abort an invocation; they travel with the record as
/// diagnostics (see [`crate::rows::Row`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("column {column}: {reason}")]
pub struct ConversionError {
  pub column: String,
  pub reason: ConversionReason,
}

impl ConversionError {
  pub fn new(column: impl Into<String>, reason: impl Into<ConversionReason>) -> Self {
    Self {
      column: column.into(),
      reason: reason.into(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionReason {
  #[error(transparent)]
  Id(#[from] IdError),

  #[error("invalid integer {0:?}")]
  InvalidInteger(String),

  #[error("binary value is not valid utf-8")]
  InvalidText,
}

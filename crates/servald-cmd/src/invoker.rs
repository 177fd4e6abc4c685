//! The single serialized entry point into an engine.

use log::debug;
use parking_lot::Mutex;

use crate::engine::{Discard, Engine, ResultSink, STATUS_ERROR};
use crate::error::{ConversionError, Error, Result};
use crate::rows::{DecodePolicy, Record, RecordSink, Row, RowAggregator};

/// Outcome of a command whose output is not decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
  pub args: Vec<String>,
  pub last_status: i32,
}

/// A single-row command's record with the status it finished with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply<T> {
  pub record: T,
  pub last_status: i32,
  pub diagnostics: Vec<ConversionError>,
}

impl<T> Reply<T> {
  pub fn into_record(self) -> T {
    self.record
  }
}

/// Every row of a streamed command, materialized in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing<T> {
  pub rows: Vec<Row<T>>,
  pub rejected: usize,
  pub last_status: i32,
}

impl<T> Listing<T> {
  pub fn records(&self) -> impl Iterator<Item = &T> {
    self.rows.iter().map(|r| &r.record)
  }

  pub fn into_records(self) -> Vec<T> {
    self.rows.into_iter().map(Row::into_record).collect()
  }
}

/// Summary of a streamed command whose rows went to a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Streamed {
  pub last_status: i32,
  pub delivered: usize,
  pub rejected: usize,
}

/// Handle to one engine.
///
/// Every invocation takes the handle's lock for its whole duration, row
/// callbacks included, so at most one command runs at a time no matter how
/// many threads share the handle. The lock is not re-entrant: a row handler
/// must not issue commands on the handle that is calling it.
pub struct ServalD<E> {
  engine: Mutex<E>,
  policy: DecodePolicy,
}

impl<E: Engine> ServalD<E> {
  pub fn new(engine: E) -> Self {
    Self {
      engine: Mutex::new(engine),
      policy: DecodePolicy::default(),
    }
  }

  #[must_use]
  pub fn with_policy(mut self, policy: DecodePolicy) -> Self {
    self.policy = policy;
    self
  }

  #[must_use]
  pub fn policy(&self) -> DecodePolicy {
    self.policy
  }

  pub fn into_engine(self) -> E {
    self.engine.into_inner()
  }

  /// Runs `args` against the engine, delivering output to `sink`.
  ///
  /// # Errors
  /// Returns [`Error::EngineFailure`] carrying `args` when the engine answers
  /// [`STATUS_ERROR`]. Any other status is returned as is.
  pub fn command(&self, sink: &mut dyn ResultSink, args: &[String]) -> Result<i32> {
    let (status, ()) = self.locked(args, |engine| (engine.raw_command(sink, args), ()));
    status
  }

  /// Holds the engine lock across `invoke`, which runs the command and
  /// drains whatever it buffered, then checks the status it returned.
  fn locked<R>(
    &self,
    args: &[String],
    invoke: impl FnOnce(&mut E) -> (i32, R),
  ) -> (Result<i32>, R) {
    let mut engine = self.engine.lock();
    debug!("servald {}", shell_words::join(args));
    let (status, out) = invoke(&mut *engine);
    drop(engine);
    if status == STATUS_ERROR {
      let err = Error::EngineFailure {
        args: args.to_vec(),
      };
      return (Err(err), out);
    }
    debug!("servald {} exited with {status}", args.first().map_or("", String::as_str));
    (Ok(status), out)
  }

  /// Runs a command whose output is ignored.
  pub fn run(&self, args: Vec<String>) -> Result<CommandResult> {
    self.run_into(&mut Discard, args)
  }

  /// Runs a command, forwarding its output verbatim to `sink`, and records the status.
  pub fn run_into(&self, sink: &mut dyn ResultSink, args: Vec<String>) -> Result<CommandResult> {
    let last_status = self.command(sink, &args)?;
    Ok(CommandResult { args, last_status })
  }

  /// Runs a command that emits at most one row, folding it into `record`.
  ///
  /// Under [`DecodePolicy::AbortRow`] a record with failed conversions is
  /// replaced by an empty one; the diagnostics are kept.
  pub fn single<T: Record + Default>(&self, record: T, args: &[String]) -> Result<Reply<T>> {
    let mut sink = RecordSink::new(record);
    let last_status = self.command(&mut sink, args)?;
    let Row {
      mut record,
      diagnostics,
    } = sink.into_row();
    if self.policy == DecodePolicy::AbortRow && !diagnostics.is_empty() {
      record = T::default();
    }
    Ok(Reply {
      record,
      last_status,
      diagnostics,
    })
  }

  /// Runs a streamed command and collects one record per row.
  pub fn collect<T, F>(&self, factory: F, args: &[String]) -> Result<Listing<T>>
  where
    T: Record,
    F: FnMut() -> T,
  {
    let (status, collected) = self.locked(args, |engine| {
      let mut rows = RowAggregator::collect(factory, self.policy);
      let status = engine.raw_command(&mut rows, args);
      (status, rows.finish())
    });
    Ok(Listing {
      rows: collected.rows,
      rejected: collected.rejected,
      last_status: status?,
    })
  }

  /// Runs a streamed command, handing each record to `handler` as its row completes.
  ///
  /// Every row, including key/value output and a trailing partial row, is
  /// handed over before the engine lock is released. Rows delivered before
  /// an engine failure stay delivered; the failure is still returned.
  pub fn stream<T, F, H>(&self, factory: F, args: &[String], mut handler: H) -> Result<Streamed>
  where
    T: Record,
    F: FnMut() -> T,
    H: FnMut(Row<T>),
  {
    let (status, collected) = self.locked(args, |engine| {
      let mut rows = RowAggregator::forward(factory, self.policy, &mut handler);
      let status = engine.raw_command(&mut rows, args);
      (status, rows.finish())
    });
    Ok(Streamed {
      last_status: status?,
      delivered: collected.delivered,
      rejected: collected.rejected,
    })
  }
}

/// Builds an argument vector from anything string-like.
pub fn argv<I, S>(tokens: I) -> Vec<String>
where
  I: IntoIterator<Item = S>,
  S: Into<String>,
{
  tokens.into_iter().map(Into::into).collect()
}

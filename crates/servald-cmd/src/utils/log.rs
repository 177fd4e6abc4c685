/// Token styling helpers.
///
/// The `t` module stands for "tokens". Use these helpers to style
/// specific values inside info messages consistently across the CLI.
pub mod t {
  use std::fmt::Display;

  use owo_colors::OwoColorize as _;

  /// Subscriber ids, bundle ids, hashes.
  pub fn id(value: impl Display) -> String {
    format!("{}", value.to_string().blue())
  }

  pub fn path(p: impl Display) -> String {
    format!("{}", p.to_string().cyan())
  }

  /// Column and config item names.
  pub fn name(name: impl Display) -> String {
    format!("{}", name.to_string().magenta())
  }

  pub fn dim(s: impl Display) -> String {
    format!("{}", s.to_string().dimmed())
  }

  pub fn ok(s: impl Display) -> String {
    format!("{}", s.to_string().green())
  }

  pub fn warn(s: impl Display) -> String {
    format!("{}", s.to_string().yellow())
  }
}

// These macros enforce the agreed style: info = neutral, warn = full-line tint.
// Use `t::*` helpers to highlight tokens in info messages only.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
  Info,
  Warn,
}

/// Info goes to stdout with the command output; warnings go to stderr.
pub(crate) fn emit(level: LogLevel, text: &str) {
  match level {
    LogLevel::Info => anstream::println!("{text}"),
    LogLevel::Warn => anstream::eprintln!("{text}"),
  }
}

#[macro_export]
macro_rules! log_info {
  ($fmt:literal $(, $args:expr )* $(,)?) => {{
    $crate::utils::log::emit(
      $crate::utils::log::LogLevel::Info,
      &format!($fmt $(, $args )*)
    );
  }};
}

#[macro_export]
macro_rules! log_warn {
  ($fmt:literal $(, $args:expr )* $(,)?) => {{
    $crate::utils::log::emit(
      $crate::utils::log::LogLevel::Warn,
      &$crate::utils::log::t::warn(format!($fmt $(, $args )*))
    );
  }};
}

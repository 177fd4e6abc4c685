//! Typed entry points for each servald command family.
//!
//! Every module pairs the argument-vector builders (usable with
//! [`ServalD::command`](crate::invoker::ServalD::command) and a caller-supplied
//! sink) with methods on the handle that decode the output.

pub mod config;
pub mod dna;
pub mod keyring;
pub mod meshms;
pub mod peers;
pub mod rhizome;
pub mod server;

use std::path::Path;

use crate::ids::FixedId;

/// Renders a path as an absolute command-line token.
pub(crate) fn path_arg(path: &Path) -> String {
  std::path::absolute(path)
    .unwrap_or_else(|_| path.to_path_buf())
    .display()
    .to_string()
}

/// Hex of an optional identifier, or the empty placeholder.
pub(crate) fn hex_or_empty<I: FixedId>(id: Option<&I>) -> String {
  id.map(FixedId::to_hex).unwrap_or_default()
}

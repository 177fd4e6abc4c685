use std::path::Path;

use crate::api::path_arg;
use crate::engine::Engine;
use crate::error::Result;
use crate::invoker::{Reply, ServalD, argv};
use crate::records::ServerStatus;

#[must_use]
pub fn start_args(exec: Option<&Path>) -> Vec<String> {
  match exec {
    Some(path) => vec!["start".into(), "exec".into(), path_arg(path)],
    None => argv(["start"]),
  }
}

impl<E: Engine> ServalD<E> {
  /// Starts the server process unless it is already running.
  pub fn server_start(&self) -> Result<Reply<ServerStatus>> {
    self.single(ServerStatus::default(), &start_args(None))
  }

  /// Starts the server from the executable at `exec`.
  pub fn server_start_exec(&self, exec: &Path) -> Result<Reply<ServerStatus>> {
    self.single(ServerStatus::default(), &start_args(Some(exec)))
  }

  pub fn server_stop(&self) -> Result<Reply<ServerStatus>> {
    self.single(ServerStatus::default(), &argv(["stop"]))
  }

  pub fn server_status(&self) -> Result<Reply<ServerStatus>> {
    self.single(ServerStatus::default(), &argv(["status"]))
  }
}

use crate::engine::Engine;
use crate::error::Result;
use crate::ids::SubscriberId;
use crate::invoker::{Listing, Reply, ServalD, Streamed, argv};
use crate::records::Identity;
use crate::rows::Row;

#[must_use]
pub fn set_did_args(sid: &SubscriberId, did: Option<&str>, name: Option<&str>) -> Vec<String> {
  vec![
    "keyring".into(),
    "set".into(),
    "did".into(),
    sid.to_hex(),
    did.unwrap_or_default().to_string(),
    name.unwrap_or_default().to_string(),
  ]
}

#[must_use]
pub fn list_args() -> Vec<String> {
  argv(["keyring", "list"])
}

#[must_use]
pub fn reverse_lookup_args(sid: &SubscriberId) -> Vec<String> {
  vec!["reverse".into(), "lookup".into(), sid.to_hex()]
}

#[must_use]
pub fn id_peers_args() -> Vec<String> {
  argv(["id", "peers"])
}

impl<E: Engine> ServalD<E> {
  /// Creates a new identity in the keyring.
  pub fn keyring_add(&self) -> Result<Reply<Identity>> {
    self.single(Identity::default(), &argv(["keyring", "add"]))
  }

  /// Sets (or clears, with `None`) the DID and name of an identity.
  pub fn keyring_set_did_name(
    &self,
    sid: &SubscriberId,
    did: Option<&str>,
    name: Option<&str>,
  ) -> Result<Reply<Identity>> {
    self.single(Identity::default(), &set_did_args(sid, did, name))
  }

  pub fn keyring_list(&self, handler: impl FnMut(Row<Identity>)) -> Result<Streamed> {
    self.stream(Identity::default, &list_args(), handler)
  }

  pub fn keyring_list_collect(&self) -> Result<Listing<Identity>> {
    self.collect(Identity::default, &list_args())
  }

  pub fn reverse_lookup(&self, sid: &SubscriberId) -> Result<Reply<Identity>> {
    self.single(Identity::default(), &reverse_lookup_args(sid))
  }

  /// Streams the currently reachable peers. Rows only carry `sid`.
  pub fn id_peers(&self, handler: impl FnMut(Row<Identity>)) -> Result<Streamed> {
    self.stream(Identity::default, &id_peers_args(), handler)
  }

  pub fn id_peers_collect(&self) -> Result<Listing<Identity>> {
    self.collect(Identity::default, &id_peers_args())
  }
}

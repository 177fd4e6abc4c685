use crate::engine::Engine;
use crate::error::Result;
use crate::invoker::{Listing, ServalD, Streamed};
use crate::records::LookupResult;
use crate::rows::Row;

/// `dna lookup <did> <timeout>`. The timeout is enforced by servald itself.
#[must_use]
pub fn lookup_args(did: &str, timeout_secs: u32) -> Vec<String> {
  vec![
    "dna".into(),
    "lookup".into(),
    did.to_string(),
    timeout_secs.to_string(),
  ]
}

impl<E: Engine> ServalD<E> {
  /// Resolves `did` on the mesh, handing each answer to `handler` as it arrives.
  pub fn dna_lookup(
    &self,
    did: &str,
    timeout_secs: u32,
    handler: impl FnMut(Row<LookupResult>),
  ) -> Result<Streamed> {
    self.stream(LookupResult::default, &lookup_args(did, timeout_secs), handler)
  }

  pub fn dna_lookup_collect(&self, did: &str, timeout_secs: u32) -> Result<Listing<LookupResult>> {
    self.collect(LookupResult::default, &lookup_args(did, timeout_secs))
  }
}

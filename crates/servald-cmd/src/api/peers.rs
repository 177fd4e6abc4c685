use crate::engine::Engine;
use crate::error::Result;
use crate::invoker::{ServalD, argv};
use crate::records::PeerCount;

impl<E: Engine> ServalD<E> {
  /// Number of peers currently reachable.
  pub fn peer_count(&self) -> Result<i64> {
    let reply = self.single(PeerCount::default(), &argv(["peer", "count"]))?;
    Ok(reply.record.count)
  }
}

use anyhow::Result;

use crate::commands::warn_diagnostics;
use crate::config::AppContext;
use crate::log_info;
use crate::utils::log::t;
use crate::utils::term::or_dash;

/// Prints each answer as soon as its row is complete.
pub fn lookup(ctx: &AppContext, did: &str, timeout: Option<u32>) -> Result<()> {
  let timeout = timeout.unwrap_or(ctx.config.dna.lookup_timeout_secs);
  let streamed = ctx.servald.dna_lookup(did, timeout, |row| {
    warn_diagnostics(&row.diagnostics);
    let r = row.record;
    anstream::println!(
      "{} {} {} {}",
      t::id(or_dash(r.sid.as_ref())),
      or_dash(r.did),
      or_dash(r.name),
      or_dash(r.uri)
    );
  })?;
  if streamed.delivered == 0 {
    log_info!("No answers for {} within {timeout}s", t::name(did));
  }
  Ok(())
}

use anyhow::Result;

use crate::commands::table_rows;
use crate::config::AppContext;
use crate::utils::term::{or_dash, print_table};

pub fn count(ctx: &AppContext) -> Result<()> {
  anstream::println!("{}", ctx.servald.peer_count()?);
  Ok(())
}

pub fn list(ctx: &AppContext) -> Result<()> {
  let listing = ctx.servald.id_peers_collect()?;
  let rows = table_rows(listing.rows, |peer| vec![or_dash(peer.sid.as_ref())]);
  print_table(&["SID"], &rows);
  Ok(())
}

use anyhow::Result;

use crate::commands::table_rows;
use crate::config::AppContext;
use crate::utils::term::{or_dash, print_table};

pub fn list(ctx: &AppContext) -> Result<()> {
  let listing = ctx.servald.keyring_list_collect()?;
  let rows = table_rows(listing.rows, |id| {
    vec![
      or_dash(id.sid.as_ref()),
      or_dash(id.did.as_deref()),
      or_dash(id.name.as_deref()),
    ]
  });
  print_table(&["SID", "DID", "NAME"], &rows);
  Ok(())
}

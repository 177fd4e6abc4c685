use anyhow::Result;

use crate::commands::table_rows;
use crate::config::AppContext;
use crate::ids::SubscriberId;
use crate::utils::term::{or_dash, print_table};

pub fn conversations(ctx: &AppContext, sid: &SubscriberId) -> Result<()> {
  let listing = ctx.servald.list_conversations_collect(sid, 0, 0)?;
  let rows = table_rows(listing.rows, |c| {
    vec![
      c.id.to_string(),
      or_dash(c.recipient.as_ref()),
      or_dash(c.read.as_deref()),
      c.last_message.to_string(),
      c.read_offset.to_string(),
    ]
  });
  print_table(&["ID", "RECIPIENT", "READ", "LAST", "READ OFFSET"], &rows);
  Ok(())
}

pub fn messages(ctx: &AppContext, sender: &SubscriberId, recipient: &SubscriberId) -> Result<()> {
  let listing = ctx.servald.list_messages_collect(sender, recipient)?;
  let rows = table_rows(listing.rows, |m| {
    vec![
      m.id.to_string(),
      m.offset.to_string(),
      or_dash(m.kind.as_deref()),
      or_dash(m.message.as_deref()),
    ]
  });
  print_table(&["ID", "OFFSET", "TYPE", "MESSAGE"], &rows);
  Ok(())
}

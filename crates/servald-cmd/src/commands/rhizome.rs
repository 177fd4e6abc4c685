use anyhow::Result;

use crate::api::rhizome::ListFilter;
use crate::commands::table_rows;
use crate::config::AppContext;
use crate::utils::term::{or_dash, print_table};

pub fn list(
  ctx: &AppContext,
  service: Option<String>,
  name: Option<String>,
  limit: Option<u32>,
) -> Result<()> {
  let filter = ListFilter {
    service,
    name,
    limit: limit.unwrap_or(ctx.config.rhizome.list_limit),
    ..ListFilter::default()
  };
  let listing = ctx.servald.rhizome_list_collect(&filter)?;
  let rows = table_rows(listing.rows, |m| {
    vec![
      or_dash(m.manifest_id.as_ref()),
      m.version.to_string(),
      m.file_size.to_string(),
      or_dash(m.service.as_deref()),
      or_dash(m.name.as_deref()),
      if m.is_read_only() { "ro" } else { "rw" }.to_string(),
    ]
  });
  print_table(&["ID", "VERSION", "SIZE", "SERVICE", "NAME", "MODE"], &rows);
  Ok(())
}

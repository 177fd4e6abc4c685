use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;

use crate::commands::warn_diagnostics;
use crate::config::{self, AppContext};
use crate::log_info;
use crate::utils::log::t;

pub fn get(ctx: &AppContext, pattern: &str) -> Result<()> {
  let reply = ctx.servald.get_config(pattern)?;
  warn_diagnostics(&reply.diagnostics);
  if reply.record.is_empty() {
    log_info!("No configuration items match {}", t::name(pattern));
    return Ok(());
  }
  for (name, value) in &reply.record.values {
    anstream::println!("{}={value}", t::name(name));
  }
  Ok(())
}

pub fn template() -> Result<()> {
  let mut stdout = io::stdout().lock();
  write!(stdout, "{}", config::config_template())?;
  Ok(())
}

pub fn path(cwd: &Path) -> Result<()> {
  let global = config::global_config_path()?;
  let project = config::project_config_path(cwd);
  for (label, p) in [("global", global), ("project", project)] {
    let state = if p.exists() { t::ok("present") } else { t::dim("missing") };
    anstream::println!("{label}: {} ({state})", t::path(p.display()));
  }
  Ok(())
}

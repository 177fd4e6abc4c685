use anyhow::Result;

use crate::commands::warn_diagnostics;
use crate::config::AppContext;
use crate::invoker::Reply;
use crate::records::ServerStatus;
use crate::utils::log::t;
use crate::utils::term::or_dash;

pub fn status(ctx: &AppContext) -> Result<()> {
  print_status(&ctx.servald.server_status()?);
  Ok(())
}

pub fn start(ctx: &AppContext) -> Result<()> {
  print_status(&ctx.servald.server_start()?);
  Ok(())
}

pub fn stop(ctx: &AppContext) -> Result<()> {
  print_status(&ctx.servald.server_stop()?);
  Ok(())
}

fn print_status(reply: &Reply<ServerStatus>) {
  warn_diagnostics(&reply.diagnostics);
  let s = &reply.record;
  let state = match s.status.as_deref() {
    Some(v @ "running") => t::ok(v),
    Some(v) => t::warn(v),
    None => t::dim("unknown"),
  };
  anstream::println!("Status: {state}");
  anstream::println!("PID: {}", s.pid);
  anstream::println!("Instance: {}", t::path(or_dash(s.instance_path.as_deref())));
  if s.tries > 0 {
    anstream::println!("Tries: {}", s.tries);
  }
  anstream::println!("MDP port: {}", s.mdp_inet_port);
  anstream::println!("HTTP port: {}", s.http_port);
  anstream::println!("Exit status: {}", reply.last_status);
}

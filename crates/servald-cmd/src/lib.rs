use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod api;
pub mod coerce;
pub mod config;
pub mod engine;
pub mod error;
pub mod ids;
pub mod invoker;
pub mod records;
pub mod replay;
pub mod rows;

mod commands;
mod utils;

pub use crate::engine::{Engine, ResultSink, STATUS_ERROR, STATUS_OK, Value};
pub use crate::error::{ConversionError, ConversionReason, Error};
pub use crate::ids::{BundleId, BundleKey, FileHash, IdError, SubscriberId};
pub use crate::invoker::{CommandResult, Listing, Reply, ServalD, Streamed};
pub use crate::replay::ReplayEngine;
pub use crate::rows::{DecodePolicy, Record, Row};

use crate::config::{AppContext, load_config};

/// servald-cmd - Run servald commands and print their typed results.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
  /// Transcript that answers commands (overrides SERVALD_CMD_TRANSCRIPT and engine.transcript)
  #[arg(long, global = true, value_name = "FILE")]
  transcript: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
  /// Show the server status
  Status,
  /// Start the server
  Start,
  /// Stop the server
  Stop,
  /// Keyring identities
  Keyring {
    #[command(subcommand)]
    cmd: KeyringCommand,
  },
  /// Server configuration items
  Config {
    #[command(subcommand)]
    cmd: ConfigCommand,
  },
  /// Reachable peers
  Peers {
    #[command(subcommand)]
    cmd: PeersCommand,
  },
  /// Phone number lookups
  Dna {
    #[command(subcommand)]
    cmd: DnaCommand,
  },
  /// Rhizome bundle store
  Rhizome {
    #[command(subcommand)]
    cmd: RhizomeCommand,
  },
  /// MeshMS conversations and messages
  Meshms {
    #[command(subcommand)]
    cmd: MeshmsCommand,
  },
  /// Run an arbitrary command and print every output event
  Raw {
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
  },
}

#[derive(Debug, Subcommand)]
enum KeyringCommand {
  /// List unlocked identities
  List,
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
  /// Print configuration items matching a pattern
  Get { pattern: String },
  /// Print the commented servald-cmd config template
  Template,
  /// Print where servald-cmd looks for its global and project config
  Path,
}

#[derive(Debug, Subcommand)]
enum PeersCommand {
  /// Print the number of reachable peers
  Count,
  /// List reachable peers
  List,
}

#[derive(Debug, Subcommand)]
enum DnaCommand {
  /// Resolve a phone number, printing answers as they arrive
  Lookup {
    did: String,
    /// Seconds to wait for answers (default: dna.lookup_timeout_secs)
    #[arg(long)]
    timeout: Option<u32>,
  },
}

#[derive(Debug, Subcommand)]
enum RhizomeCommand {
  /// List bundles
  List {
    #[arg(long)]
    service: Option<String>,
    #[arg(long)]
    name: Option<String>,
    /// Maximum number of bundles (default: rhizome.list_limit, 0 = all)
    #[arg(long)]
    limit: Option<u32>,
  },
}

#[derive(Debug, Subcommand)]
enum MeshmsCommand {
  /// List the conversations of an identity
  Conversations { sid: SubscriberId },
  /// List the messages between two identities
  Messages {
    sender: SubscriberId,
    recipient: SubscriberId,
  },
}

pub fn parse() -> Cli {
  Cli::parse()
}

pub fn run() -> Result<()> {
  let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
    .format_timestamp_secs()
    .try_init();

  let cli = parse();
  let cwd = std::env::current_dir()?;
  // these need no engine
  match cli.command {
    Commands::Config {
      cmd: ConfigCommand::Template,
    } => return commands::config::template(),
    Commands::Config {
      cmd: ConfigCommand::Path,
    } => return commands::config::path(&cwd),
    _ => {}
  }

  let config = load_config(&cwd)?;
  let ctx = AppContext::open(config, cli.transcript.as_deref())?;

  match cli.command {
    Commands::Status => commands::server::status(&ctx)?,
    Commands::Start => commands::server::start(&ctx)?,
    Commands::Stop => commands::server::stop(&ctx)?,
    Commands::Keyring {
      cmd: KeyringCommand::List,
    } => commands::keyring::list(&ctx)?,
    Commands::Config { cmd } => match cmd {
      ConfigCommand::Get { pattern } => commands::config::get(&ctx, &pattern)?,
      ConfigCommand::Template => commands::config::template()?,
      ConfigCommand::Path => commands::config::path(&cwd)?,
    },
    Commands::Peers { cmd } => match cmd {
      PeersCommand::Count => commands::peers::count(&ctx)?,
      PeersCommand::List => commands::peers::list(&ctx)?,
    },
    Commands::Dna {
      cmd: DnaCommand::Lookup { did, timeout },
    } => commands::dna::lookup(&ctx, &did, timeout)?,
    Commands::Rhizome {
      cmd: RhizomeCommand::List {
        service,
        name,
        limit,
      },
    } => commands::rhizome::list(&ctx, service, name, limit)?,
    Commands::Meshms { cmd } => match cmd {
      MeshmsCommand::Conversations { sid } => commands::meshms::conversations(&ctx, &sid)?,
      MeshmsCommand::Messages { sender, recipient } => {
        commands::meshms::messages(&ctx, &sender, &recipient)?;
      }
    },
    Commands::Raw { args } => commands::raw::run(&ctx, args)?,
  }

  Ok(())
}

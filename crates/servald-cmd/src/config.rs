use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::OwoColorize as _;
use serde::Deserialize;
use toml::Value as TomlValue;

use crate::invoker::ServalD;
use crate::replay::ReplayEngine;
use crate::rows::DecodePolicy;

/// Known top-level config keys.
const KNOWN_TOP_LEVEL_KEYS: &[&str] = &["decode", "dna", "rhizome", "engine"];

/// Known keys per section.
const KNOWN_SECTION_KEYS: &[(&str, &[&str])] = &[
  ("decode", &["policy"]),
  ("dna", &["lookup_timeout_secs"]),
  ("rhizome", &["list_limit"]),
  ("engine", &["transcript"]),
];

/// Environment variable overriding `engine.transcript`.
pub const TRANSCRIPT_ENV: &str = "SERVALD_CMD_TRANSCRIPT";

// Embed repository defaults
const DEFAULT_TOML: &str =
  include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/defaults/servald-cmd.toml"));

/// Embedded config template with all options commented out for documentation.
const CONFIG_TEMPLATE: &str = include_str!(concat!(
  env!("CARGO_MANIFEST_DIR"),
  "/defaults/servald-cmd.template.toml"
));

#[must_use]
pub fn config_template() -> &'static str {
  CONFIG_TEMPLATE
}

/// Resolve the global config file path.
///
/// # Errors
/// Returns an error if the XDG config home cannot be resolved.
pub fn global_config_path() -> Result<PathBuf> {
  let xdg = xdg::BaseDirectories::with_prefix("servald-cmd");
  let config_home = xdg
    .get_config_home()
    .ok_or_else(|| anyhow::anyhow!("unable to resolve XDG config home"))?;
  Ok(config_home.join("servald-cmd.toml"))
}

/// Path of the project config below `cwd`.
#[must_use]
pub fn project_config_path(cwd: &Path) -> PathBuf {
  cwd.join(".servald").join("servald-cmd.toml")
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DecodeConfig {
  #[serde(default)]
  pub policy: DecodePolicy,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DnaConfig {
  #[serde(default)]
  pub lookup_timeout_secs: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RhizomeConfig {
  /// Default `rhizome list` page size; 0 lists everything.
  #[serde(default)]
  pub list_limit: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
  #[serde(default)]
  pub transcript: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientConfig {
  #[serde(default)]
  pub decode: DecodeConfig,
  #[serde(default)]
  pub dna: DnaConfig,
  #[serde(default)]
  pub rhizome: RhizomeConfig,
  #[serde(default)]
  pub engine: EngineConfig,
}

impl ClientConfig {
  /// Transcript to replay, with precedence: explicit > `SERVALD_CMD_TRANSCRIPT` > config.
  #[must_use]
  pub fn transcript_path(&self, explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = explicit {
      return Some(p.to_path_buf());
    }
    if let Ok(env_path) = std::env::var(TRANSCRIPT_ENV)
      && !env_path.trim().is_empty()
    {
      return Some(PathBuf::from(env_path));
    }
    self.engine.transcript.clone()
  }
}

/// Loaded configuration plus the engine handle every command runs against.
pub struct AppContext {
  pub config: ClientConfig,
  pub servald: ServalD<ReplayEngine>,
}

impl AppContext {
  /// Loads the transcript selected by `explicit`, the environment, or the config.
  ///
  /// # Errors
  /// Returns an error when no transcript is configured or it cannot be loaded.
  pub fn open(config: ClientConfig, explicit: Option<&Path>) -> Result<Self> {
    let path = config.transcript_path(explicit).ok_or_else(|| {
      anyhow::anyhow!("no engine configured: pass --transcript <FILE> or set {TRANSCRIPT_ENV}")
    })?;
    let engine = ReplayEngine::load(&path)?;
    let servald = ServalD::new(engine).with_policy(config.decode.policy);
    Ok(Self { config, servald })
  }
}

fn merge_values(base: &mut TomlValue, overlay: TomlValue) {
  match (base, overlay) {
    (TomlValue::Table(base_tbl), TomlValue::Table(overlay_tbl)) => {
      for (k, v) in overlay_tbl {
        match base_tbl.get_mut(&k) {
          Some(existing) => merge_values(existing, v),
          None => {
            base_tbl.insert(k, v);
          }
        }
      }
    }
    // Arrays and scalars: replace last-wins
    (base_slot, new_v) => *base_slot = new_v,
  }
}

/// Warn about unknown keys in a parsed TOML config file.
fn warn_unknown_keys(val: &TomlValue, file_path: &Path) {
  let TomlValue::Table(table) = val else {
    return;
  };

  for key in table.keys() {
    if !KNOWN_TOP_LEVEL_KEYS.contains(&key.as_str()) {
      eprintln!(
        "{}: unknown config key '{}' in {} (did you mean one of: {}?)",
        "warning".yellow(),
        key,
        file_path.display(),
        KNOWN_TOP_LEVEL_KEYS.join(", ")
      );
    }
  }

  for (section, known) in KNOWN_SECTION_KEYS {
    let Some(TomlValue::Table(inner)) = table.get(*section) else {
      continue;
    };
    for key in inner.keys() {
      if !known.contains(&key.as_str()) {
        eprintln!(
          "{}: unknown config key '{}.{}' in {} (known keys: {})",
          "warning".yellow(),
          section,
          key,
          file_path.display(),
          known.join(", ")
        );
      }
    }
  }
}

fn merge_file(merged: &mut TomlValue, path: &Path) -> Result<()> {
  let data =
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let val: TomlValue =
    toml::from_str(&data).with_context(|| format!("invalid TOML in {}", path.display()))?;
  warn_unknown_keys(&val, path);
  merge_values(merged, val);
  Ok(())
}

/// Load and merge configuration from defaults, global, and project files.
///
/// # Errors
/// Returns an error if any of the config files cannot be read or parsed
/// as valid TOML.
pub fn load_config(cwd: &Path) -> Result<ClientConfig> {
  // Start with embedded defaults
  let mut merged: TomlValue =
    toml::from_str(DEFAULT_TOML).context("invalid embedded default config")?;

  // Merge global XDG config if present
  let xdg = xdg::BaseDirectories::with_prefix("servald-cmd");
  if let Some(global_path) = xdg.find_config_file("servald-cmd.toml") {
    merge_file(&mut merged, &global_path)?;
  }

  let project_cfg = project_config_path(cwd);
  if project_cfg.exists() {
    merge_file(&mut merged, &project_cfg)?;
  }

  let cfg: ClientConfig = merged
    .try_into()
    .context("failed to parse merged config")?;
  Ok(cfg)
}

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serial_test::serial;
use tempfile::Builder;

use servald_cmd::DecodePolicy;
use servald_cmd::config::{TRANSCRIPT_ENV, load_config};
mod common;

fn write_global(xdg_root: &Path, body: &str) -> Result<()> {
  let global_dir = xdg_root.join("servald-cmd");
  fs::create_dir_all(&global_dir)?;
  fs::write(global_dir.join("servald-cmd.toml"), body)?;
  Ok(())
}

fn write_project(dir: &Path, body: &str) -> Result<()> {
  let project_dir = dir.join(".servald");
  fs::create_dir_all(&project_dir)?;
  fs::write(project_dir.join("servald-cmd.toml"), body)?;
  Ok(())
}

#[test]
#[serial]
fn defaults_only() -> Result<()> {
  let dir = Builder::new().tempdir_in(common::tmp_root())?;
  let xdg_root = Builder::new().tempdir_in(common::tmp_root())?;
  temp_env::with_var(
    "XDG_CONFIG_HOME",
    Some(xdg_root.path().as_os_str()),
    || -> Result<()> {
      let cfg = load_config(dir.path())?;
      assert_eq!(cfg.decode.policy, DecodePolicy::Lenient);
      assert_eq!(cfg.dna.lookup_timeout_secs, 5);
      assert_eq!(cfg.rhizome.list_limit, 0);
      assert!(cfg.engine.transcript.is_none());
      Ok(())
    },
  )?;
  Ok(())
}

#[test]
#[serial]
fn global_override_takes_precedence_over_defaults() -> Result<()> {
  let dir = Builder::new().tempdir_in(common::tmp_root())?;
  let xdg_root = Builder::new().tempdir_in(common::tmp_root())?;
  temp_env::with_var(
    "XDG_CONFIG_HOME",
    Some(xdg_root.path().as_os_str()),
    || -> Result<()> {
      write_global(
        xdg_root.path(),
        "[decode]\npolicy = \"abort_row\"\n\n[dna]\nlookup_timeout_secs = 9\n",
      )?;

      let cfg = load_config(dir.path())?;
      assert_eq!(cfg.decode.policy, DecodePolicy::AbortRow);
      assert_eq!(cfg.dna.lookup_timeout_secs, 9);
      // untouched sections keep their defaults
      assert_eq!(cfg.rhizome.list_limit, 0);
      Ok(())
    },
  )?;
  Ok(())
}

#[test]
#[serial]
fn project_override_wins_over_global() -> Result<()> {
  let dir = Builder::new().tempdir_in(common::tmp_root())?;
  let xdg_root = Builder::new().tempdir_in(common::tmp_root())?;
  temp_env::with_var(
    "XDG_CONFIG_HOME",
    Some(xdg_root.path().as_os_str()),
    || -> Result<()> {
      write_global(
        xdg_root.path(),
        "[dna]\nlookup_timeout_secs = 9\n\n[rhizome]\nlist_limit = 50\n",
      )?;
      write_project(dir.path(), "[dna]\nlookup_timeout_secs = 2\n")?;

      let cfg = load_config(dir.path())?;
      assert_eq!(cfg.dna.lookup_timeout_secs, 2);
      assert_eq!(cfg.rhizome.list_limit, 50);
      Ok(())
    },
  )?;
  Ok(())
}

#[test]
#[serial]
fn invalid_project_toml_names_the_file() -> Result<()> {
  let dir = Builder::new().tempdir_in(common::tmp_root())?;
  let xdg_root = Builder::new().tempdir_in(common::tmp_root())?;
  write_project(dir.path(), "[dna]\nlookup_timeout_secs = ")?;
  temp_env::with_var("XDG_CONFIG_HOME", Some(xdg_root.path().as_os_str()), || {
    let err = load_config(dir.path()).expect_err("broken TOML");
    let msg = format!("{err:#}");
    assert!(msg.contains("invalid TOML"), "{msg}");
    assert!(msg.contains("servald-cmd.toml"), "{msg}");
  });
  Ok(())
}

#[test]
#[serial]
fn unknown_policy_fails_to_parse() -> Result<()> {
  let dir = Builder::new().tempdir_in(common::tmp_root())?;
  let xdg_root = Builder::new().tempdir_in(common::tmp_root())?;
  write_project(dir.path(), "[decode]\npolicy = \"strict\"\n")?;
  temp_env::with_var("XDG_CONFIG_HOME", Some(xdg_root.path().as_os_str()), || {
    assert!(load_config(dir.path()).is_err());
  });
  Ok(())
}

#[test]
#[serial]
fn transcript_precedence() -> Result<()> {
  let dir = Builder::new().tempdir_in(common::tmp_root())?;
  let xdg_root = Builder::new().tempdir_in(common::tmp_root())?;
  write_project(dir.path(), "[engine]\ntranscript = \"from-config.toml\"\n")?;
  temp_env::with_vars(
    [
      ("XDG_CONFIG_HOME", Some(xdg_root.path().display().to_string())),
      (TRANSCRIPT_ENV, None),
    ],
    || -> Result<()> {
      let cfg = load_config(dir.path())?;
      assert_eq!(
        cfg.transcript_path(None),
        Some(PathBuf::from("from-config.toml"))
      );

      temp_env::with_var(TRANSCRIPT_ENV, Some("from-env.toml"), || {
        assert_eq!(
          cfg.transcript_path(None),
          Some(PathBuf::from("from-env.toml"))
        );
        assert_eq!(
          cfg.transcript_path(Some(Path::new("explicit.toml"))),
          Some(PathBuf::from("explicit.toml"))
        );
      });
      Ok(())
    },
  )?;
  Ok(())
}

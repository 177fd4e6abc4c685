#![allow(dead_code)]
use std::path::{Path, PathBuf};

use anyhow::Result;
use assert_cmd::Command;
use tempfile::{Builder, TempDir};

use servald_cmd::config::TRANSCRIPT_ENV;

pub fn alice() -> String {
  "AB".repeat(32)
}

pub fn bob() -> String {
  "CD".repeat(32)
}

/// Answers for the commands the CLI and end-to-end tests exercise.
pub fn transcript() -> String {
  let alice = alice();
  let bob = bob();
  format!(
    r#"
[[command]]
args = ["start"]
fields = [
  {{ name = "instancepath", value = "/var/serval" }},
  {{ name = "status", value = "running" }},
  {{ name = "pid", value = 1234 }},
  {{ name = "mdp_inet_port", value = "4110" }},
  {{ name = "http_port", value = 4110 }},
]

[[command]]
args = ["status"]
status = 1
fields = [{{ name = "status", value = "stopped" }}]

[[command]]
args = ["peer", "count"]
columns = ["count"]
rows = [[7]]

[[command]]
args = ["config", "get", "debug"]
fields = [
  {{ name = "debug.rhizome", value = "on" }},
  {{ name = "debug.mdp", value = "off" }},
]

[[command]]
args = ["keyring", "list"]
columns = ["sid", "did", "name"]
rows = [
  ["{alice}", "5551234", "Alice"],
  [{{ hex = "{bob}" }}, "5559876", ""],
  ["not-a-sid", "5550000", "Mallory"],
]

[[command]]
args = ["id", "peers"]
columns = ["sid"]
rows = [["{alice}"], ["{bob}"]]

[[command]]
args = ["rhizome", "list", "", "", "", ""]
columns = ["_id", "service", "id", "version", "date", ".inserttime", ".author", ".fromhere", "filesize", "filehash", "sender", "recipient", "name"]
rows = [
  [1, "file", "{bid1}", 3, 1700000000000, 1700000000001, "{alice}", 1, 12, "{hash}", "", "", "notes.txt"],
  [2, "MeshMS2", "{bid2}", 1, 1700000000002, 1700000000003, "", 0, 0, "", "{alice}", "{bob}", ""],
]

[[command]]
args = ["meshms", "list", "conversations", "{alice}", "0", "0"]
columns = ["_id", "recipient", "read", "last_message", "read_offset"]
rows = [[0, "{bob}", "unread", 240, 120]]

[[command]]
args = ["meshms", "list", "messages", "{alice}", "{bob}"]
columns = ["_id", "offset", "type", "message"]
rows = [[0, 120, ">", "hi bob"], [1, 240, "<", "hi alice"]]

[[command]]
args = ["dna", "lookup", "5551234", "5"]
columns = ["sid", "did", "name", "uri"]
rows = [["{alice}", "5551234", "Alice", "sid://{alice}/5551234"]]
"#,
    bid1 = "11".repeat(32),
    bid2 = "22".repeat(32),
    hash = "3F".repeat(64),
  )
}

pub fn tmp_root() -> PathBuf {
  let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
  // Walk two parents up: crates/servald-cmd -> crates -> workspace root
  let workspace_root = manifest_dir
    .parent()
    .and_then(|p| p.parent())
    .unwrap_or(&manifest_dir)
    .to_path_buf();
  let root = workspace_root.join("target").join("test-tmp");
  let _ = std::fs::create_dir_all(&root);
  root
}

/// A sandboxed working directory with its own XDG config home.
#[derive(Debug)]
pub struct TestEnv {
  temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    let temp = Builder::new()
      .prefix("servald-cmd-test-")
      .tempdir_in(tmp_root())
      .expect("temp dir");
    Self { temp }
  }

  pub fn path(&self) -> &Path {
    self.temp.path()
  }

  pub fn xdg_home_dir(&self) -> PathBuf {
    self.path().join("xdg")
  }

  /// Write `contents` as the transcript and return its path.
  pub fn write_transcript(&self, contents: &str) -> Result<PathBuf> {
    let path = self.path().join("transcript.toml");
    std::fs::write(&path, contents)?;
    Ok(path)
  }

  pub fn write_project_config(&self, contents: &str) -> Result<()> {
    let dir = self.path().join(".servald");
    std::fs::create_dir_all(&dir)?;
    std::fs::write(dir.join("servald-cmd.toml"), contents)?;
    Ok(())
  }

  pub fn write_xdg_config(&self, contents: &str) -> Result<()> {
    let dir = self.xdg_home_dir().join("servald-cmd");
    std::fs::create_dir_all(&dir)?;
    std::fs::write(dir.join("servald-cmd.toml"), contents)?;
    Ok(())
  }

  /// The binary, isolated from the caller's config and environment.
  pub fn bin_cmd(&self) -> Result<Command> {
    let mut cmd = Command::cargo_bin("servald-cmd")?;
    cmd.current_dir(self.path());
    cmd.env("XDG_CONFIG_HOME", self.xdg_home_dir());
    cmd.env_remove(TRANSCRIPT_ENV);
    cmd.env_remove("RUST_LOG");
    cmd.env_remove("CLICOLOR_FORCE");
    cmd.env("NO_COLOR", "1");
    Ok(cmd)
  }

  /// [`Self::bin_cmd`] answering from the shared transcript.
  pub fn scripted(&self) -> Result<Command> {
    let transcript = self.write_transcript(&transcript())?;
    let mut cmd = self.bin_cmd()?;
    cmd.arg("--transcript").arg(transcript);
    Ok(cmd)
  }
}

use std::path::Path;

use crate::api::{hex_or_empty, path_arg};
use crate::engine::Engine;
use crate::error::Result;
use crate::ids::{BundleId, SubscriberId};
use crate::invoker::{CommandResult, Listing, Reply, ServalD, Streamed, argv};
use crate::records::Manifest;
use crate::rows::Row;

/// Inputs to `rhizome add file`. Every part is optional.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddFile<'a> {
  pub payload: Option<&'a Path>,
  pub manifest: Option<&'a Path>,
  pub author: Option<&'a SubscriberId>,
  pub pin: Option<&'a str>,
}

/// Filter and paging for `rhizome list`. Zero offset/limit means "not given".
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
  pub service: Option<String>,
  pub name: Option<String>,
  pub sender: Option<SubscriberId>,
  pub recipient: Option<SubscriberId>,
  pub offset: u32,
  pub limit: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectMode {
  Push,
  Pull,
  Sync,
}

impl DirectMode {
  #[must_use]
  pub fn as_str(self) -> &'static str {
    match self {
      DirectMode::Push => "push",
      DirectMode::Pull => "pull",
      DirectMode::Sync => "sync",
    }
  }
}

#[must_use]
pub fn add_file_args(req: &AddFile<'_>) -> Vec<String> {
  let mut args = argv(["rhizome", "add", "file"]);
  if let Some(pin) = req.pin {
    args.push("--entry-pin".into());
    args.push(pin.to_string());
  }
  args.push(hex_or_empty(req.author));
  match (req.payload, req.manifest) {
    (Some(payload), _) => args.push(path_arg(payload)),
    // the manifest path is positional, so an absent payload still needs its slot
    (None, Some(_)) => args.push(String::new()),
    (None, None) => {}
  }
  if let Some(manifest) = req.manifest {
    args.push(path_arg(manifest));
  }
  args
}

#[must_use]
pub fn list_args(filter: &ListFilter) -> Vec<String> {
  let mut args = argv(["rhizome", "list"]);
  args.push(filter.service.clone().unwrap_or_default());
  args.push(filter.name.clone().unwrap_or_default());
  args.push(hex_or_empty(filter.sender.as_ref()));
  args.push(hex_or_empty(filter.recipient.as_ref()));
  if filter.offset > 0 {
    args.push(filter.offset.to_string());
  } else if filter.limit > 0 {
    args.push("0".into());
  }
  if filter.limit > 0 {
    args.push(filter.limit.to_string());
  }
  args
}

#[must_use]
pub fn import_bundle_args(payload: &Path, manifest: &Path) -> Vec<String> {
  let mut args = argv(["rhizome", "import", "bundle"]);
  args.push(path_arg(payload));
  args.push(path_arg(manifest));
  args
}

fn manifest_or_dash(manifest: Option<&Path>) -> String {
  manifest.map_or_else(|| "-".to_string(), path_arg)
}

#[must_use]
pub fn extract_bundle_args(bid: &BundleId, manifest: Option<&Path>, payload: &Path) -> Vec<String> {
  let mut args = argv(["rhizome", "extract", "bundle"]);
  args.push(bid.to_hex());
  args.push(manifest_or_dash(manifest));
  args.push(path_arg(payload));
  args
}

#[must_use]
pub fn extract_file_args(bid: &BundleId, payload: &Path) -> Vec<String> {
  let mut args = argv(["rhizome", "extract", "file"]);
  args.push(bid.to_hex());
  args.push(path_arg(payload));
  args
}

#[must_use]
pub fn export_manifest_args(bid: &BundleId, manifest: Option<&Path>) -> Vec<String> {
  let mut args = argv(["rhizome", "export", "manifest"]);
  args.push(bid.to_hex());
  args.push(manifest_or_dash(manifest));
  args
}

#[must_use]
pub fn direct_args(mode: DirectMode) -> Vec<String> {
  argv(["rhizome", "direct", mode.as_str()])
}

impl<E: Engine> ServalD<E> {
  pub fn rhizome_add_file(&self, req: &AddFile<'_>) -> Result<Reply<Manifest>> {
    self.single(Manifest::default(), &add_file_args(req))
  }

  pub fn rhizome_list(
    &self,
    filter: &ListFilter,
    handler: impl FnMut(Row<Manifest>),
  ) -> Result<Streamed> {
    self.stream(Manifest::default, &list_args(filter), handler)
  }

  pub fn rhizome_list_collect(&self, filter: &ListFilter) -> Result<Listing<Manifest>> {
    self.collect(Manifest::default, &list_args(filter))
  }

  pub fn rhizome_import_bundle(&self, payload: &Path, manifest: &Path) -> Result<Reply<Manifest>> {
    self.single(Manifest::default(), &import_bundle_args(payload, manifest))
  }

  /// Writes the manifest (unless `manifest` is `None`) and payload of `bid`.
  pub fn rhizome_extract_bundle(
    &self,
    bid: &BundleId,
    manifest: Option<&Path>,
    payload: &Path,
  ) -> Result<Reply<Manifest>> {
    self.single(
      Manifest::default(),
      &extract_bundle_args(bid, manifest, payload),
    )
  }

  pub fn rhizome_extract_file(&self, bid: &BundleId, payload: &Path) -> Result<Reply<Manifest>> {
    self.single(Manifest::default(), &extract_file_args(bid, payload))
  }

  pub fn rhizome_export_manifest(
    &self,
    bid: &BundleId,
    manifest: Option<&Path>,
  ) -> Result<Reply<Manifest>> {
    self.single(Manifest::default(), &export_manifest_args(bid, manifest))
  }

  /// Exchanges bundles with every configured direct host.
  pub fn rhizome_direct(&self, mode: DirectMode) -> Result<CommandResult> {
    self.run(direct_args(mode))
  }
}

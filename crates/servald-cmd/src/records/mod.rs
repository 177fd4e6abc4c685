//! Typed records for each servald command family.
//!
//! Every decoder matches the column names it knows and ignores the rest.

mod config_items;
mod identity;
mod manifest;
mod meshms;
mod peers;
mod status;

pub use config_items::ConfigItems;
pub use identity::{Identity, LookupResult};
pub use manifest::Manifest;
pub use meshms::{Conversation, Message};
pub use peers::PeerCount;
pub use status::ServerStatus;

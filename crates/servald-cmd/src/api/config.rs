use log::warn;

use crate::coerce::{parse_bool, parse_number};
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::invoker::{CommandResult, Reply, ServalD};
use crate::records::ConfigItems;

#[must_use]
pub fn get_args(pattern: &str) -> Vec<String> {
  vec!["config".into(), "get".into(), pattern.to_string()]
}

#[must_use]
pub fn set_args(name: &str, value: &str) -> Vec<String> {
  vec![
    "config".into(),
    "set".into(),
    name.to_string(),
    value.to_string(),
  ]
}

#[must_use]
pub fn del_args(name: &str) -> Vec<String> {
  vec!["config".into(), "del".into(), name.to_string()]
}

impl<E: Engine> ServalD<E> {
  /// Every configuration item matching `pattern`.
  pub fn get_config(&self, pattern: &str) -> Result<Reply<ConfigItems>> {
    self.single(ConfigItems::default(), &get_args(pattern))
  }

  /// The value of exactly `name`, if set.
  pub fn config_item(&self, name: &str) -> Result<Option<String>> {
    let mut items = self.get_config(name)?.record;
    Ok(items.values.remove(name))
  }

  /// `name` parsed as a servald boolean. Engine failures fall back to `default`.
  pub fn config_item_bool(&self, name: &str, default: bool) -> bool {
    match self.config_item(name) {
      Ok(value) => parse_bool(value.as_deref(), default),
      Err(err) => {
        warn!("Reading {name} failed, using {default}: {err}");
        default
      }
    }
  }

  /// `name` parsed as an integer.
  ///
  /// Engine failures and unset items fall back to `default`.
  ///
  /// # Errors
  /// Returns [`Error::Conversion`] when the item is set but not an integer.
  pub fn config_item_int(&self, name: &str, default: i64) -> Result<i64> {
    let value = match self.config_item(name) {
      Ok(value) => value,
      Err(err @ Error::EngineFailure { .. }) => {
        warn!("Reading {name} failed, using {default}: {err}");
        return Ok(default);
      }
      Err(err) => return Err(err),
    };
    match value {
      Some(text) => Ok(parse_number(name, &text)?),
      None => Ok(default),
    }
  }

  pub fn set_config_item(&self, name: &str, value: &str) -> Result<CommandResult> {
    self.run(set_args(name, value))
  }

  pub fn delete_config(&self, name: &str) -> Result<CommandResult> {
    self.run(del_args(name))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::engine::{ResultSink, STATUS_ERROR, STATUS_OK};

  fn items(pairs: &'static [(&'static str, &'static str)]) -> ServalD<impl Engine> {
    ServalD::new(move |sink: &mut dyn ResultSink, _args: &[String]| {
      for (name, value) in pairs {
        sink.field_name(name);
        sink.put_text(value);
      }
      STATUS_OK
    })
  }

  #[test]
  fn item_lookup_is_exact() -> Result<()> {
    let servald = items(&[("debug.rhizome", "on"), ("debug.rhizome.ads", "off")]);
    assert_eq!(servald.config_item("debug.rhizome")?.as_deref(), Some("on"));
    assert_eq!(servald.config_item("debug")?, None);
    Ok(())
  }

  #[test]
  fn bool_items_follow_the_truth_table() {
    let servald = items(&[("a", "No"), ("b", "yes"), ("c", "")]);
    assert!(!servald.config_item_bool("a", true));
    assert!(servald.config_item_bool("b", false));
    assert!(servald.config_item_bool("c", true));
    assert!(!servald.config_item_bool("missing", false));
  }

  #[test]
  fn int_items_default_when_unset_and_fail_when_garbled() -> Result<()> {
    let servald = items(&[("port", " 4110 "), ("bad", "forty")]);
    assert_eq!(servald.config_item_int("port", 1)?, 4110);
    assert_eq!(servald.config_item_int("missing", 9)?, 9);
    assert!(matches!(
      servald.config_item_int("bad", 0),
      Err(Error::Conversion(_))
    ));
    Ok(())
  }

  #[test]
  fn engine_failure_falls_back_to_defaults() -> Result<()> {
    let servald = ServalD::new(|_: &mut dyn ResultSink, _: &[String]| STATUS_ERROR);
    assert!(servald.config_item_bool("x", true));
    assert_eq!(servald.config_item_int("x", 3)?, 3);
    assert!(servald.config_item("x").is_err());
    Ok(())
  }

  #[test]
  fn set_and_del_vectors() {
    assert_eq!(set_args("debug", "on"), vec!["config", "set", "debug", "on"]);
    assert_eq!(del_args("debug"), vec!["config", "del", "debug"]);
  }
}

use crate::coerce::{narrow_i32, optional_identifier};
use crate::engine::Value;
use crate::error::ConversionError;
use crate::ids::{BundleId, BundleKey, FileHash, SubscriberId};
use crate::rows::Record;

/// A Rhizome manifest as reported by `rhizome add/list/import/extract/export`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
  pub manifest_id: Option<BundleId>,
  pub version: i64,
  pub file_size: i64,
  pub file_hash: Option<FileHash>,
  pub bundle_key: Option<BundleKey>,
  pub date: i64,
  pub crypt: i32,
  pub service: Option<String>,
  pub name: Option<String>,
  /// Set from `.readonly` or `.fromhere`; see [`Manifest::is_read_only`].
  pub read_only: Option<bool>,
  pub manifest: Option<Vec<u8>>,
  pub secret: Option<String>,
  pub author: Option<SubscriberId>,
  pub row_id: i64,
  pub insert_time: i64,
}

impl Manifest {
  /// Whether this node may not update the bundle. Unknown means read-only.
  #[must_use]
  pub fn is_read_only(&self) -> bool {
    self.read_only.unwrap_or(true)
  }
}

impl Record for Manifest {
  fn put(&mut self, column: &str, value: Value<'_>) -> Result<(), ConversionError> {
    match (column, value) {
      ("manifestid" | "id", Value::Text(_) | Value::Binary(_)) => {
        if let Some(id) = optional_identifier(column, value)? {
          self.manifest_id = Some(id);
        }
      }
      ("filehash", Value::Text(_) | Value::Binary(_)) => {
        if let Some(hash) = optional_identifier(column, value)? {
          self.file_hash = Some(hash);
        }
      }
      ("BK", Value::Text(_) | Value::Binary(_)) => {
        if let Some(key) = optional_identifier(column, value)? {
          self.bundle_key = Some(key);
        }
      }
      (".author", Value::Text(_) | Value::Binary(_)) => {
        if let Some(author) = optional_identifier(column, value)? {
          self.author = Some(author);
        }
      }
      ("service", Value::Text(v)) => self.service = Some(v.to_string()),
      ("name", Value::Text(v)) => self.name = Some(v.to_string()),
      ("secret", Value::Text(v)) => self.secret = Some(v.to_string()),
      ("manifest", Value::Binary(v)) => self.manifest = Some(v.to_vec()),
      ("version", Value::Integer(v)) => self.version = v,
      ("filesize", Value::Integer(v)) => self.file_size = v,
      ("date", Value::Integer(v)) => self.date = v,
      ("crypt", Value::Integer(v)) => self.crypt = narrow_i32(v),
      (".readonly", Value::Integer(v)) => self.read_only = Some(v > 0),
      (".fromhere", Value::Integer(v)) => self.read_only = Some(v == 0),
      (".rowid" | "_id", Value::Integer(v)) => self.row_id = v,
      (".inserttime", Value::Integer(v)) => self.insert_time = v,
      _ => {}
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const BID: &str = "1111111111111111111111111111111111111111111111111111111111111111";

  fn hash_hex() -> String {
    "2F".repeat(64)
  }

  fn feed(order: &[usize]) -> Result<Manifest, ConversionError> {
    let hash = hash_hex();
    let events: [(&str, Value<'_>); 4] = [
      ("manifestid", Value::Text(BID)),
      ("filehash", Value::Text(&hash)),
      ("crypt", Value::Integer(1)),
      ("name", Value::Text("x")),
    ];
    let mut m = Manifest::default();
    for &i in order {
      let (column, value) = events[i];
      m.put(column, value)?;
    }
    Ok(m)
  }

  #[test]
  fn known_columns_in_any_order() -> Result<(), ConversionError> {
    let orders = [[0, 1, 2, 3], [3, 2, 1, 0], [2, 0, 3, 1], [1, 3, 0, 2]];
    let expected = Manifest {
      manifest_id: Some(BundleId::from_hex(BID).expect("bid")),
      file_hash: Some(FileHash::from_hex(&hash_hex()).expect("hash")),
      crypt: 1,
      name: Some("x".into()),
      ..Manifest::default()
    };
    for order in orders {
      let m = feed(&order)?;
      assert_eq!(m, expected);
      assert_eq!(m.bundle_key, None);
      assert_eq!(m.version, 0);
      assert_eq!(m.read_only, None);
    }
    Ok(())
  }

  #[test]
  fn readonly_columns_map_per_name() -> Result<(), ConversionError> {
    let mut m = Manifest::default();
    assert!(m.is_read_only());
    m.put_integer(".fromhere", 1)?;
    assert!(!m.is_read_only());
    m.put_integer(".fromhere", 0)?;
    assert!(m.is_read_only());
    m.put_integer(".readonly", 0)?;
    assert!(!m.is_read_only());
    m.put_integer(".readonly", 2)?;
    assert!(m.is_read_only());
    Ok(())
  }

  #[test]
  fn empty_identifier_text_is_skipped() -> Result<(), ConversionError> {
    let mut m = Manifest::default();
    m.put_text("BK", "")?;
    m.put_text(".author", "")?;
    assert_eq!(m, Manifest::default());
    Ok(())
  }

  #[test]
  fn row_id_and_raw_manifest() -> Result<(), ConversionError> {
    let mut m = Manifest::default();
    m.put_integer("_id", 9)?;
    m.put_integer(".inserttime", 1_700_000_000_000)?;
    m.put_binary("manifest", b"service=file\n")?;
    m.put_text("id", BID)?;
    assert_eq!(m.row_id, 9);
    assert_eq!(m.insert_time, 1_700_000_000_000);
    assert_eq!(m.manifest.as_deref(), Some(&b"service=file\n"[..]));
    assert!(m.manifest_id.is_some());
    Ok(())
  }

  #[test]
  fn bad_file_hash_keeps_other_fields() {
    let mut m = Manifest::default();
    m.put_text("service", "file").expect("service");
    let err = m.put_text("filehash", "ABCD").expect_err("too short");
    assert_eq!(err.column, "filehash");
    assert_eq!(m.file_hash, None);
    assert_eq!(m.service.as_deref(), Some("file"));
  }
}

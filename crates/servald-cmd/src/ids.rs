//! Fixed-length binary identifiers used by servald.
//!
//! All of them are built either from raw bytes or from hex text and render as
//! uppercase hex, which is what servald prints and accepts on its command line.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
  #[error("invalid hex for {kind}: {value:?}")]
  InvalidHex { kind: &'static str, value: String },

  #[error("{kind} must be {expected} bytes, got {actual}")]
  InvalidLength {
    kind: &'static str,
    expected: usize,
    actual: usize,
  },
}

/// Common constructors shared by every identifier type.
pub trait FixedId: Sized {
  const KIND: &'static str;
  const LEN: usize;

  fn from_binary(bytes: &[u8]) -> Result<Self, IdError>;

  fn from_hex(text: &str) -> Result<Self, IdError> {
    let bytes = hex::decode(text).map_err(|_| IdError::InvalidHex {
      kind: Self::KIND,
      value: text.to_string(),
    })?;
    Self::from_binary(&bytes)
  }

  fn to_hex(&self) -> String;
}

macro_rules! fixed_id {
  ($(#[$meta:meta])* $name:ident, $len:literal, $kind:literal) => {
    $(#[$meta])*
    #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct $name([u8; $len]);

    impl $name {
      pub fn from_binary(bytes: &[u8]) -> Result<Self, IdError> {
        <Self as FixedId>::from_binary(bytes)
      }

      pub fn from_hex(text: &str) -> Result<Self, IdError> {
        <Self as FixedId>::from_hex(text)
      }

      #[must_use]
      pub fn to_hex(&self) -> String {
        <Self as FixedId>::to_hex(self)
      }

      #[must_use]
      pub fn as_bytes(&self) -> &[u8; $len] {
        &self.0
      }
    }

    impl FixedId for $name {
      const KIND: &'static str = $kind;
      const LEN: usize = $len;

      fn from_binary(bytes: &[u8]) -> Result<Self, IdError> {
        let raw: [u8; $len] = bytes.try_into().map_err(|_| IdError::InvalidLength {
          kind: $kind,
          expected: $len,
          actual: bytes.len(),
        })?;
        Ok(Self(raw))
      }

      fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
      }
    }

    impl From<[u8; $len]> for $name {
      fn from(raw: [u8; $len]) -> Self {
        Self(raw)
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
      }
    }

    impl fmt::Debug for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", stringify!($name), self.to_hex())
      }
    }

    impl FromStr for $name {
      type Err = IdError;

      fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as FixedId>::from_hex(s)
      }
    }
  };
}

fixed_id!(
  /// Public key identifying a subscriber (SID).
  SubscriberId,
  32,
  "subscriber id"
);

fixed_id!(
  /// Identifier of a Rhizome bundle (its manifest id).
  BundleId,
  32,
  "bundle id"
);

fixed_id!(
  /// Bundle key (`BK`) stored in a Rhizome manifest.
  BundleKey,
  32,
  "bundle key"
);

fixed_id!(
  /// SHA-512 of a Rhizome payload.
  FileHash,
  64,
  "file hash"
);

#[cfg(test)]
mod tests {
  use super::*;

  const SID_HEX: &str = "0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF";

  #[test]
  fn parses_hex_in_any_case_and_prints_uppercase() -> Result<(), IdError> {
    let sid = SubscriberId::from_hex(&SID_HEX.to_lowercase())?;
    assert_eq!(sid.to_string(), SID_HEX);
    assert_eq!(sid.as_bytes()[0], 0x01);
    Ok(())
  }

  #[test]
  fn hex_and_binary_forms_agree() -> Result<(), IdError> {
    let from_hex: SubscriberId = SID_HEX.parse()?;
    let from_bin = SubscriberId::from_binary(from_hex.as_bytes())?;
    assert_eq!(from_hex, from_bin);
    Ok(())
  }

  #[test]
  fn rejects_non_hex_text() {
    let err = BundleId::from_hex("zz").expect_err("not hex");
    assert!(matches!(err, IdError::InvalidHex { kind: "bundle id", .. }));
  }

  #[test]
  fn rejects_wrong_length() {
    let err = FileHash::from_binary(&[0u8; 32]).expect_err("too short");
    assert_eq!(
      err,
      IdError::InvalidLength {
        kind: "file hash",
        expected: 64,
        actual: 32
      }
    );
    let err = SubscriberId::from_hex("ABCD").expect_err("too short");
    assert!(matches!(err, IdError::InvalidLength { actual: 2, .. }));
  }
}

//! Cryptographically secure secret generation.
//!
//! Secrets are 32 bytes drawn from the operating system's secure random
//! source, encoded as 64 lowercase hexadecimal characters. No seeded or
//! pseudo-random generator is reachable anywhere in this crate.

use std::fmt;

use rand::RngCore;
use rand::rngs::OsRng;

/// Number of random bytes per secret.
pub const SECRET_BYTES: usize = 32;

/// Length of the hex-encoded secret string.
pub const SECRET_LEN: usize = SECRET_BYTES * 2;

/// An opaque secret token.
///
/// `Display` yields the hex value for writing into a config file; `Debug` is
/// redacted so the value cannot leak through error or log formatting.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for Secret {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl fmt::Debug for Secret {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Secret(..)")
  }
}

/// Generates a fresh secret from the OS secure random source.
///
/// Fails with [`SecretError::RandomSourceUnavailable`] if the source cannot
/// be read; there is no fallback to a weaker generator.
pub fn generate() -> Result<Secret, SecretError> {
  let mut bytes = [0u8; SECRET_BYTES];
  OsRng
    .try_fill_bytes(&mut bytes)
    .map_err(SecretError::RandomSourceUnavailable)?;

  Ok(Secret(hex::encode(bytes)))
}

/// Errors that can occur while generating a secret.
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
  /// The OS secure random source could not be read
  #[error("Secure random source unavailable: {0}")]
  RandomSourceUnavailable(rand::Error),
}

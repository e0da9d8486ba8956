//! Environment file synchronization functionality.
//!
//! This module rewrites a `key=value` file so that exactly one line binds a
//! given variable to a given value, preserving every other line verbatim and
//! in its original order. A missing file is treated as empty and created on
//! write.
//!
//! # Write semantics
//!
//! Non-dry-run writes are all-or-nothing: the full serialized document goes
//! to a temporary file in the target's directory, which is then renamed over
//! the target. A failed write leaves the previous contents intact. Dry-run
//! calls never touch storage and only return the projected content.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::path::Path;
//! use env_rotate::sync::sync_variable;
//!
//! let result = sync_variable(Path::new(".env"), "API_KEY", "abc123", false).unwrap();
//! assert!(result.written);
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

use crate::document::{EnvDocument, Placement};

/// Outcome of one synchronization call.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncResult {
  /// The target file.
  pub path: PathBuf,
  /// Full serialized content of the file after the operation (or as it would
  /// be, in dry-run mode).
  pub content: String,
  /// Whether the binding replaced an existing line or was appended.
  pub placement: Placement,
  /// False when dry-run skipped the write.
  pub written: bool,
}

/// Ensures `path` contains exactly one `variable_name=new_value` line.
///
/// Validates the name and value before any I/O. In dry-run mode the file is
/// read but never written; the returned [`SyncResult`] carries the projected
/// content either way.
pub fn sync_variable(
  path: &Path,
  variable_name: &str,
  new_value: &str,
  dry_run: bool,
) -> Result<SyncResult, SyncError> {
  validate_name(variable_name)?;
  validate_value(new_value)?;

  #[cfg(feature = "tracing")]
  debug!(?path, variable_name, dry_run, "Syncing variable");

  let mut document = read_document(path)?;
  let placement = document.set(variable_name, new_value);

  #[cfg(feature = "tracing")]
  trace!(?placement, "Applied binding");

  let content = document.to_string();

  if dry_run {
    return Ok(SyncResult {
      path: path.to_path_buf(),
      content,
      placement,
      written: false,
    });
  }

  write_atomic(path, &content).map_err(|source| SyncError::PathNotWritable {
    path: path.to_path_buf(),
    source,
  })?;

  #[cfg(feature = "tracing")]
  debug!(?path, "Wrote updated file");

  Ok(SyncResult {
    path: path.to_path_buf(),
    content,
    placement,
    written: true,
  })
}

fn validate_name(name: &str) -> Result<(), SyncError> {
  if name.is_empty() || name.contains(['=', '\n', '\r']) {
    return Err(SyncError::InvalidVariableName(name.to_owned()));
  }
  Ok(())
}

fn validate_value(value: &str) -> Result<(), SyncError> {
  if value.contains(['\n', '\r']) {
    return Err(SyncError::InvalidValue(value.to_owned()));
  }
  Ok(())
}

/// Reads the file into a document; a missing file yields an empty document.
fn read_document(path: &Path) -> Result<EnvDocument, SyncError> {
  match std::fs::read_to_string(path) {
    Ok(content) => Ok(EnvDocument::from(content.as_str())),
    Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
      #[cfg(feature = "tracing")]
      debug!(?path, "File does not exist, starting empty");

      Ok(EnvDocument::default())
    }
    Err(source) => Err(SyncError::Read {
      path: path.to_path_buf(),
      source,
    }),
  }
}

/// Replaces `path` with `content` via a same-directory temp file and rename,
/// so a crash or permission failure never leaves a truncated target.
fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
  let dir = match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  };

  let mut file = NamedTempFile::new_in(dir)?;
  file.write_all(content.as_bytes())?;
  file.persist(path).map_err(|err| err.error)?;
  Ok(())
}

/// Errors that can occur during synchronization.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
  /// The variable name is empty or contains `=` or a line break
  #[error("Invalid variable name: {0:?}")]
  InvalidVariableName(String),
  /// The new value contains a line break
  #[error("Invalid value (contains a line break): {0:?}")]
  InvalidValue(String),
  /// Error reading the existing file
  #[error("Failed to read {path}: {source}")]
  Read {
    path: PathBuf,
    source: std::io::Error,
  },
  /// Error creating, writing or renaming the replacement file
  #[error("Cannot write {path}: {source}")]
  PathNotWritable {
    path: PathBuf,
    source: std::io::Error,
  },
}

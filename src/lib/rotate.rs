//! Secret rotation orchestration.
//!
//! A rotation generates one fresh secret and synchronizes two files with the
//! same dry-run flag: the live env file receives the real secret, the
//! example/template file receives a fixed placeholder so no real secret ever
//! lands in a committed sample.
//!
//! # Failure policy
//!
//! A missing current secret or an unavailable random source aborts the run
//! before any file is touched. Once the secret exists, the two file updates
//! are independent: a failure on one target is recorded and the other target
//! is still attempted. There is no rollback: a live file that was already
//! rotated keeps its new secret even if the example file update fails.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use env_rotate::rotate::{Rotation, RotateOptions};
//!
//! let options = RotateOptions {
//!     live_file: PathBuf::from("chat.env"),
//!     example_file: PathBuf::from("chat.env.example"),
//!     variable: "GPT_AGENT_API_KEY".into(),
//!     placeholder: "your-api-key-here".into(),
//!     current_value: std::env::var("GPT_AGENT_API_KEY").ok(),
//!     dry_run: false,
//! };
//!
//! let report = Rotation::rotate(options).unwrap();
//! assert!(report.is_success());
//! ```

use std::path::PathBuf;

#[cfg(feature = "tracing")]
use tracing::{debug, info};

use crate::secret::{self, SecretError};
use crate::sync::{SyncError, SyncResult, sync_variable};

/// Inputs for one rotation run.
///
/// `current_value` is the tracked variable's value as read from the process
/// environment at startup; the rotation logic itself never reads globals.
pub struct RotateOptions {
  /// The file consumed by the running system; receives the real secret.
  pub live_file: PathBuf,
  /// The checked-in sample file; receives the placeholder.
  pub example_file: PathBuf,
  /// Name of the variable to rotate.
  pub variable: String,
  /// Non-secret value written to the example file.
  pub placeholder: String,
  /// Current value of the variable, if set. Only its presence matters.
  pub current_value: Option<String>,
  /// When true, compute and report without writing anything.
  pub dry_run: bool,
}

/// Outcome for a single target file.
#[derive(Debug)]
pub enum FileReport {
  Synced(SyncResult),
  Failed { path: PathBuf, error: SyncError },
}

/// Aggregated outcome of a rotation run.
#[derive(Debug)]
pub struct RotationReport {
  pub dry_run: bool,
  pub files: Vec<FileReport>,
}

impl RotationReport {
  /// True only when every target file synchronized.
  pub fn is_success(&self) -> bool {
    self
      .files
      .iter()
      .all(|file| matches!(file, FileReport::Synced(_)))
  }
}

/// Rotation service.
pub struct Rotation;

impl Rotation {
  /// Rotates the tracked variable across the live and example files.
  ///
  /// Fails fast if no current value is present or the secure random source
  /// is unavailable; per-file write failures are collected in the report
  /// instead of aborting the sibling target.
  pub fn rotate(options: RotateOptions) -> Result<RotationReport, RotateError> {
    let RotateOptions {
      live_file,
      example_file,
      variable,
      placeholder,
      current_value,
      dry_run,
    } = options;

    // Rotation never runs blind: a prior value must exist, even though the
    // new secret does not depend on it.
    if current_value.as_deref().is_none_or(str::is_empty) {
      return Err(RotateError::MissingCurrentSecret(variable));
    }

    #[cfg(feature = "tracing")]
    info!(variable, dry_run, "Rotating secret");

    let secret = secret::generate()?;

    #[cfg(feature = "tracing")]
    debug!("Generated replacement secret");

    let targets = [
      (live_file, secret.as_str()),
      (example_file, placeholder.as_str()),
    ];

    let files = targets
      .into_iter()
      .map(|(path, value)| match sync_variable(&path, &variable, value, dry_run) {
        Ok(result) => FileReport::Synced(result),
        Err(error) => FileReport::Failed { path, error },
      })
      .collect();

    Ok(RotationReport { dry_run, files })
  }
}

/// Errors that abort a rotation before any file is touched.
#[derive(Debug, thiserror::Error)]
pub enum RotateError {
  /// The tracked variable is absent from (or empty in) the environment
  #[error("{0} not found in environment. Set it before rotating.")]
  MissingCurrentSecret(String),
  /// The secure random source failed
  #[error(transparent)]
  Secret(#[from] SecretError),
}

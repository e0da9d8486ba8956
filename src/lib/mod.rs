//! Secret rotation for environment files.
//!
//! This library generates a fresh high-entropy secret and propagates it into
//! `key=value` configuration files without disturbing any other line. The
//! live env file receives the real secret; a companion example/template file
//! receives a fixed placeholder so no secret ever lands in a committed
//! sample. A dry-run mode shows the projected content of each file without
//! writing anything.
//!
//! # Features
//!
//! - **Secure generation**: 32 bytes from the OS random source, hex-encoded
//! - **Line preservation**: unrelated lines survive byte-for-byte, in order
//! - **Atomic writes**: temp-file-and-rename, never a truncated target
//! - **Optional tracing**: detailed logging when the `tracing` feature is enabled
//!
//! # Example
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

pub mod document;
pub mod rotate;
pub mod secret;
pub mod sync;

//! Line-preserving model of a `key=value` environment file.
//!
//! Unlike a full dotenv parser, this model never interprets lines: every line
//! that is not the tracked binding is kept byte-for-byte and in its original
//! order across a rewrite. Comments, blank lines, indentation and malformed
//! lines all survive untouched.

use std::fmt;

#[cfg(feature = "tracing")]
use tracing::trace;

const ASSIGNMENT_OPERATOR: &str = "=";

/// An ordered sequence of raw text lines.
///
/// A file that does not exist yet is represented as an empty document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnvDocument {
  pub lines: Vec<String>,
}

impl fmt::Display for EnvDocument {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for line in &self.lines {
      writeln!(f, "{}", line)?;
    }
    Ok(())
  }
}

impl From<&str> for EnvDocument {
  fn from(s: &str) -> Self {
    Self {
      lines: s.lines().map(str::to_owned).collect(),
    }
  }
}

/// Where [`EnvDocument::set`] placed the binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
  /// An existing binding was replaced at its original line index.
  Replaced(usize),
  /// No binding existed; a new line was appended at the end.
  Appended,
}

impl EnvDocument {
  /// Returns the value of the first binding for `name`, if any.
  pub fn get(&self, name: &str) -> Option<&str> {
    self
      .lines
      .iter()
      .find_map(|line| line.strip_prefix(name)?.strip_prefix(ASSIGNMENT_OPERATOR))
  }

  /// Ensures exactly one line binds `name` to `value`.
  ///
  /// The first line starting with `name=` is replaced in place; any later
  /// duplicate bindings for the same name are dropped. If no line matches,
  /// `name=value` is appended as the last line. All other lines keep their
  /// content and relative order.
  pub fn set(&mut self, name: &str, value: &str) -> Placement {
    let prefix = format!("{}{}", name, ASSIGNMENT_OPERATOR);
    let binding = format!("{}{}", prefix, value);

    let Some(index) = self.lines.iter().position(|line| line.starts_with(&prefix)) else {
      #[cfg(feature = "tracing")]
      trace!("No existing binding for {}, appending", name);

      self.lines.push(binding);
      return Placement::Appended;
    };

    #[cfg(feature = "tracing")]
    trace!("Replacing binding for {} at line {}", name, index + 1);

    self.lines[index] = binding;

    // Duplicate bindings collapse onto the first occurrence.
    let mut seen = 0;
    self.lines.retain(|line| {
      if line.starts_with(&prefix) {
        seen += 1;
        seen == 1
      } else {
        true
      }
    });

    Placement::Replaced(index)
  }
}

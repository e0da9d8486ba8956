use env_rotate::rotate::{FileReport, RotateError, RotateOptions, Rotation};
use env_rotate::sync::sync_variable;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const VARIABLE: &str = "GPT_AGENT_API_KEY";
const PLACEHOLDER: &str = "your-api-key-here";

fn rotate_options(temp_dir: &TempDir, current: Option<&str>, dry_run: bool) -> RotateOptions {
  RotateOptions {
    live_file: temp_dir.path().join("chat.env"),
    example_file: temp_dir.path().join("chat.env.example"),
    variable: VARIABLE.into(),
    placeholder: PLACEHOLDER.into(),
    current_value: current.map(str::to_owned),
    dry_run,
  }
}

#[test]
fn test_rotation_with_fresh_files() {
  let temp_dir = TempDir::new().unwrap();
  let live_path = temp_dir.path().join("chat.env");
  fs::write(&live_path, "FOO=bar\n").unwrap();

  let report = Rotation::rotate(rotate_options(&temp_dir, Some("old-secret"), false)).unwrap();
  assert!(report.is_success());

  let live = fs::read_to_string(&live_path).unwrap();
  let lines: Vec<&str> = live.lines().collect();
  assert_eq!(lines.len(), 2);
  assert_eq!(lines[0], "FOO=bar");

  let secret = lines[1].strip_prefix("GPT_AGENT_API_KEY=").unwrap();
  assert_eq!(secret.len(), 64);
  assert!(
    secret
      .chars()
      .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
  );

  let example = fs::read_to_string(temp_dir.path().join("chat.env.example")).unwrap();
  assert_eq!(example, "GPT_AGENT_API_KEY=your-api-key-here\n");
}

#[test]
fn test_missing_precondition_writes_nothing() {
  let temp_dir = TempDir::new().unwrap();

  let err = Rotation::rotate(rotate_options(&temp_dir, None, false)).unwrap_err();
  match err {
    RotateError::MissingCurrentSecret(variable) => assert_eq!(variable, VARIABLE),
    other => panic!("Expected MissingCurrentSecret, got {:?}", other),
  }

  assert!(!temp_dir.path().join("chat.env").exists());
  assert!(!temp_dir.path().join("chat.env.example").exists());
}

#[test]
fn test_dry_run_previews_without_writing() {
  let temp_dir = TempDir::new().unwrap();
  let live_path = temp_dir.path().join("chat.env");
  fs::write(&live_path, "GPT_AGENT_API_KEY=old\n").unwrap();

  let report = Rotation::rotate(rotate_options(&temp_dir, Some("old"), true)).unwrap();
  assert!(report.is_success());

  // Disk is untouched
  assert_eq!(
    fs::read_to_string(&live_path).unwrap(),
    "GPT_AGENT_API_KEY=old\n"
  );
  assert!(!temp_dir.path().join("chat.env.example").exists());

  // The preview carries a fresh 64-char hex replacement
  match &report.files[0] {
    FileReport::Synced(result) => {
      assert!(!result.written);
      let projected = result.content.trim_end();
      let secret = projected.strip_prefix("GPT_AGENT_API_KEY=").unwrap();
      assert_eq!(secret.len(), 64);
      assert!(secret.chars().all(|c| c.is_ascii_hexdigit()));
    }
    other => panic!("Expected Synced, got {:?}", other),
  }
}

#[test]
fn test_successive_rotations_yield_distinct_secrets() {
  let temp_dir = TempDir::new().unwrap();
  let live_path = temp_dir.path().join("chat.env");

  Rotation::rotate(rotate_options(&temp_dir, Some("old"), false)).unwrap();
  let first = fs::read_to_string(&live_path).unwrap();

  Rotation::rotate(rotate_options(&temp_dir, Some("old"), false)).unwrap();
  let second = fs::read_to_string(&live_path).unwrap();

  assert_ne!(first, second);
  // Same shape though: one line, replaced in place
  assert_eq!(first.lines().count(), 1);
  assert_eq!(second.lines().count(), 1);
}

#[test]
fn test_unwritable_live_file_still_updates_example() {
  let temp_dir = TempDir::new().unwrap();
  let mut options = rotate_options(&temp_dir, Some("old"), false);
  options.live_file = PathBuf::from("/nonexistent/dir/chat.env");

  let report = Rotation::rotate(options).unwrap();
  assert!(!report.is_success());

  match &report.files[0] {
    FileReport::Failed { path, .. } => {
      assert_eq!(path, &PathBuf::from("/nonexistent/dir/chat.env"));
    }
    other => panic!("Expected Failed, got {:?}", other),
  }

  let example = fs::read_to_string(temp_dir.path().join("chat.env.example")).unwrap();
  assert_eq!(example, "GPT_AGENT_API_KEY=your-api-key-here\n");
}

#[test]
fn test_sync_preserves_surrounding_content() {
  let temp_dir = TempDir::new().unwrap();
  let path = temp_dir.path().join(".env");

  let content = "# Database configuration
DB_HOST=localhost
DB_PORT=5432

GPT_AGENT_API_KEY=old # rotate me
EXTRA=value";
  fs::write(&path, content).unwrap();

  sync_variable(&path, "GPT_AGENT_API_KEY", "new", false).unwrap();

  let expected = "# Database configuration
DB_HOST=localhost
DB_PORT=5432

GPT_AGENT_API_KEY=new
EXTRA=value
";
  assert_eq!(fs::read_to_string(&path).unwrap(), expected);
}

#[test]
fn test_duplicate_bindings_collapse_to_one() {
  let temp_dir = TempDir::new().unwrap();
  let path = temp_dir.path().join(".env");
  fs::write(&path, "KEY=a\nOTHER=x\nKEY=b\n").unwrap();

  sync_variable(&path, "KEY", "new", false).unwrap();

  assert_eq!(fs::read_to_string(&path).unwrap(), "KEY=new\nOTHER=x\n");
}

use clap::Parser;
use env_rotate::rotate::{FileReport, RotateError, RotateOptions, Rotation, RotationReport};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
  name = "env-rotate",
  about = "Rotate a secret in your env file without touching anything else",
  version,
  author
)]
struct Cli {
  /// Path to the live env file
  #[arg(short, long, default_value = "chat.env")]
  env_file: PathBuf,

  /// Path to the example/template file (gets a placeholder, never the secret)
  #[arg(short, long, default_value = "chat.env.example")]
  template: PathBuf,

  /// Name of the variable to rotate; its current value must be set in the
  /// environment
  #[arg(long, default_value = "GPT_AGENT_API_KEY")]
  variable: String,

  /// Placeholder value written to the template file
  #[arg(long, default_value = "your-api-key-here")]
  placeholder: String,

  /// Preview changes without applying them
  #[arg(long)]
  dry_run: bool,

  /// Verbose output (-v for verbose, -vv for very verbose)
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,
}

fn setup_tracing(verbose: u8) {
  use tracing_subscriber::fmt;
  use tracing_subscriber::prelude::*;

  let log_level = match verbose {
    1 => "debug",
    2 => "trace",
    _ => "info",
  };

  tracing_subscriber::registry()
    .with(fmt::layer())
    .with(tracing_subscriber::EnvFilter::new(
      std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.into()),
    ))
    .init();
}

fn report_outcome(report: &RotationReport) {
  for file in &report.files {
    match file {
      FileReport::Synced(result) if report.dry_run => {
        println!("[dry-run] Would update {}:", result.path.display());
        print!("{}", result.content);
      }
      FileReport::Synced(result) => {
        println!("Updated {}", result.path.display());
      }
      FileReport::Failed { path, error } => {
        eprintln!("Failed to update {}: {}", path.display(), error);
      }
    }
  }

  if report.dry_run {
    println!("Dry-run complete. No changes written.");
  } else if report.is_success() {
    println!("Secret rotated successfully.");
  }
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  setup_tracing(cli.verbose);

  // Sourced once here so the rotation logic stays free of hidden env reads.
  let current_value = std::env::var(&cli.variable).ok();

  let options = RotateOptions {
    live_file: cli.env_file,
    example_file: cli.template,
    variable: cli.variable,
    placeholder: cli.placeholder,
    current_value,
    dry_run: cli.dry_run,
  };

  match Rotation::rotate(options) {
    Ok(report) => {
      report_outcome(&report);
      if report.is_success() {
        ExitCode::SUCCESS
      } else {
        ExitCode::FAILURE
      }
    }
    Err(err @ RotateError::MissingCurrentSecret(_)) => {
      eprintln!("{}", err);
      ExitCode::FAILURE
    }
    Err(err) => {
      eprintln!("Rotation aborted: {}", err);
      ExitCode::FAILURE
    }
  }
}

//! Command-line interface for the forwarder generator.
//!
//! ## Usage
//!
//! - `ctxstrip -f client.go` - generate forwarders for one file, to stdout
//! - `ctxstrip -d ./api -o wrappers.go` - process every `.go` file in a
//!   directory, writing one combined output file
//! - `ctxstrip --snippet -f client.go` - emit declarations only, no package
//!   clause or imports
//!
//! With no `-f`/`-d` given, the `GOFILE` environment variable (set by
//! `go generate`) names the input file.
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros. Command
//! functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Generate context-free forwarders for Go WithContext functions
#[derive(Parser, Debug)]
#[command(name = "ctxstrip")]
#[command(version = VERSION)]
#[command(about = "Generate context-free forwarders for Go WithContext functions", long_about = None)]
pub struct Cli {
    /// Go source file to process (default: $GOFILE)
    #[arg(short = 'f', long = "file", value_name = "FILE", conflicts_with = "dir")]
    pub file: Option<PathBuf>,

    /// Directory of Go source files to process
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long = "out", value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Emit declarations only, without package clause or imports
    #[arg(long)]
    pub snippet: bool,
}

/// The input selected by the flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    File(PathBuf),
    Dir(PathBuf),
}

impl Cli {
    /// Resolve the input source: `-d` wins over `-f`, which falls back to the
    /// `GOFILE` environment variable.
    pub fn input(&self) -> CliResult<Input> {
        if let Some(dir) = &self.dir {
            return Ok(Input::Dir(dir.clone()));
        }
        if let Some(file) = &self.file {
            return Ok(Input::File(file.clone()));
        }
        match env::var("GOFILE") {
            Ok(gofile) if !gofile.is_empty() => Ok(Input::File(PathBuf::from(gofile))),
            _ => Err(CliError::failure(
                "Error: no input; pass -f FILE, -d DIR, or set GOFILE",
            )),
        }
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let input = cli.input()?;
    commands::generate(&input, cli.out.as_deref(), cli.snippet)
}

// ============================================================================
// Tests
// ============================================================================

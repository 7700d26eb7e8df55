//! CLI module for vtag
//!
//! ## Commands
//!
//! - `names --schema <file> --record <name> --label <label>...` - Resolve field names from a JSON catalog
//! - `records --schema <file>` - List the records a catalog defines
//! - `convert <ident>...` - Apply a naming convention to identifiers
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::encoder::Convention;
use crate::resolver::DEFAULT_MAX_DEPTH;
use crate::tag::DEFAULT_TAG_KEY;

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

/// Resolve annotated record fields into name lists
#[derive(Parser, Debug)]
#[command(name = "vtag")]
#[command(version = VERSION)]
#[command(about = "Resolve annotated record fields into name lists", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the field names of a record for a set of labels
    Names(NamesArgs),

    /// List the records defined by a catalog
    Records {
        /// JSON record catalog
        #[arg(long, value_name = "FILE")]
        schema: PathBuf,
    },

    /// Apply a naming convention to identifiers
    Convert {
        /// Identifiers to convert
        #[arg(value_name = "IDENT", required = true)]
        idents: Vec<String>,
        /// Naming convention
        #[arg(short, long, value_enum, default_value_t = Convention::Underscore)]
        convention: Convention,
        /// Prefix joined in front of every result
        #[arg(long, default_value = "")]
        prefix: String,
    },
}

/// Options for the `names` command.
#[derive(Args, Debug, Clone)]
pub struct NamesArgs {
    /// JSON record catalog
    #[arg(long, value_name = "FILE")]
    pub schema: PathBuf,
    /// Record to resolve (a leading `*` adds indirection)
    #[arg(short, long)]
    pub record: String,
    /// Requested labels (repeatable, or comma-separated)
    #[arg(short, long = "label", value_delimiter = ',', required = true)]
    pub labels: Vec<String>,
    /// Prefix for every resolved name
    #[arg(long, default_value = "")]
    pub prefix: String,
    /// Naming convention for fields without an explicit name
    #[arg(short, long, value_enum, default_value_t = Convention::Raw)]
    pub convention: Convention,
    /// Annotation key to read
    #[arg(long, default_value = DEFAULT_TAG_KEY)]
    pub tag_key: String,
    /// Disable the name cache
    #[arg(long)]
    pub no_cache: bool,
    /// Maximum record nesting depth
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Lines)]
    pub format: OutputFormat,
}

/// How resolved names are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One name per line
    Lines,
    /// A JSON array
    Json,
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
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
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

/// Execute the CLI command and return its output.
pub fn execute(cli: Cli) -> CliResult<String> {
    match cli.command {
        Command::Names(args) => commands::names(&args),
        Command::Records { schema } => commands::records(&schema),
        Command::Convert {
            idents,
            convention,
            prefix,
        } => Ok(commands::convert(&idents, convention, &prefix)),
    }
}

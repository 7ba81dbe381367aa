//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Parser, Subcommand, ValueEnum};
use rollbook_core::Role;
use std::io::IsTerminal;
use std::path::PathBuf;

/// Rollbook CLI - roster payload and dataset validation
///
/// A command-line tool for validating attendance lists, custom-question
/// answers, field references, and enrolment consistency against a roster
/// dataset.
#[derive(Parser, Debug)]
#[command(
    name = "rollbook",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "ROLLBOOK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a single payload file against a dataset
    Validate(ValidateArgs),

    /// Run every applicable validator across a whole dataset
    Check(CheckArgs),

    /// Check a payload against an ad-hoc schema descriptor
    Schema(SchemaArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the payload file (JSON or YAML)
    #[arg(value_name = "PAYLOAD")]
    pub payload: PathBuf,

    /// Path to the roster dataset the payload is validated against
    #[arg(short, long, env = "ROLLBOOK_DATASET")]
    pub dataset: Option<PathBuf>,

    /// Payload kind; auto-detected from the payload's shape when omitted
    #[arg(short, long, value_enum)]
    pub kind: Option<PayloadKind>,

    /// Role the information payload claims (required for information payloads)
    #[arg(short, long, value_enum)]
    pub role: Option<RoleArg>,

    /// Show the payload alongside the result
    #[arg(long)]
    pub detailed: bool,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Path to the roster dataset file (JSON or YAML)
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,
}

/// Arguments for the schema command
#[derive(Parser, Debug)]
pub struct SchemaArgs {
    /// Path to the payload file (JSON or YAML)
    #[arg(value_name = "PAYLOAD")]
    pub payload: PathBuf,

    /// Path to the schema descriptor file (JSON or YAML)
    #[arg(short, long)]
    pub schema: PathBuf,

    /// Reject keys the descriptor does not declare
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// The payload shapes `validate` understands
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PayloadKind {
    /// A class's attendance list: `[{date, attendees}]`
    Attendance,
    /// A session's applicable-field id list: `[int]`
    Fields,
    /// A student's information mapping: `{field id: response}`
    Information,
    /// An enrolment record
    Enrolment,
}

/// Role a student claims on an information payload
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    Parent,
    Child,
    Guest,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Parent => Role::Parent,
            RoleArg::Child => Role::Child,
            RoleArg::Guest => Role::Guest,
        }
    }
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}

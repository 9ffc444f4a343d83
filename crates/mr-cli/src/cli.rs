//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use mr_core::{BackendKind, SplitStrategy};

/// migrun - apply an ordered set of SQL migrations, best effort, then report
#[derive(Parser, Debug)]
#[command(name = "migrun")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Postgres connection string for the direct backend
    #[arg(long, global = true, env = "MIGRUN_DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Base URL of the REST service
    #[arg(long, global = true, env = "MIGRUN_API_URL")]
    pub api_url: Option<String>,

    /// Service key for the REST service
    #[arg(long, global = true, env = "MIGRUN_SERVICE_KEY", hide_env_values = true)]
    pub service_key: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply the configured migrations in order
    Run(RunArgs),

    /// List configured migrations
    Ls(LsArgs),

    /// Show the statements the per-statement backend would send for a file
    Split(SplitArgs),
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Override the configured backend
    #[arg(short, long, value_enum)]
    pub backend: Option<BackendArg>,

    /// Migration numbers to run (comma-separated, default: all)
    #[arg(short, long)]
    pub select: Option<String>,

    /// Count missing migration files as failures
    #[arg(long)]
    pub fail_on_missing: bool,

    /// Override the configured statement splitter
    #[arg(long, value_enum)]
    pub split: Option<SplitArg>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: RunOutput,
}

/// Backend choices
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendArg {
    /// Direct Postgres connection, whole file per call
    Direct,
    /// One RPC call per file
    BulkRest,
    /// One RPC call per statement
    PerStatementRest,
}

impl From<BackendArg> for BackendKind {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Direct => BackendKind::Direct,
            BackendArg::BulkRest => BackendKind::BulkRest,
            BackendArg::PerStatementRest => BackendKind::PerStatementRest,
        }
    }
}

/// Statement splitter choices
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitArg {
    /// Tokenizer-aware splitting (quotes, comments, dollar quoting)
    Tokenizer,
    /// Split on every semicolon
    Naive,
}

impl From<SplitArg> for SplitStrategy {
    fn from(arg: SplitArg) -> Self {
        match arg {
            SplitArg::Tokenizer => SplitStrategy::Tokenizer,
            SplitArg::Naive => SplitStrategy::Naive,
        }
    }
}

/// Run output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutput {
    /// Progress lines and a summary
    Text,
    /// Run summary as JSON
    Json,
}

/// Arguments for the ls command
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: LsOutput,
}

/// List output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LsOutput {
    /// Table format
    Table,
    /// JSON output
    Json,
}

/// Arguments for the split command
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// SQL file to split
    pub file: String,

    /// Override the configured statement splitter
    #[arg(long, value_enum)]
    pub split: Option<SplitArg>,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

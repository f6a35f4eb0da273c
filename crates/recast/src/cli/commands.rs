//! Command-line argument definitions.

use clap::{Args, Parser, Subcommand};
use recast::{LogFormat, OutputFormat};
use std::path::PathBuf;

/// Rewrite content for Instagram, Tiktok and LinkedIn.
#[derive(Parser, Debug)]
#[command(name = "recast")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./recast.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rewrite content for every configured platform
    Run(RunArgs),
    /// List the platforms and the editor role behind each
    Platforms,
    /// Print the effective configuration with the API key redacted
    Config,
}

/// Arguments for `recast run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Content to rewrite
    #[arg(long, conflicts_with = "file")]
    pub content: Option<String>,

    /// Read content from a file instead (stdin when neither is given)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Keep successful platforms when others fail
    #[arg(long)]
    pub isolated: bool,
}

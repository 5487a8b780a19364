//! Command-line embedding surface for the table-valued scan — a demo
//! driver outside any specific SQL engine's bind context. A subcommand
//! per operation (`scan`, `stats`, `formats`) with `colored` output,
//! suited to exploring the wide `ValidationEvent` schema from a terminal.

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "duck-hunt-log")]
#[command(author, version, about = "Multi-format validation-event log scanner")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan sources and print the normalized validation-event relation
    Scan(ScanArgs),
    /// Scan sources and print aggregate counts instead of individual rows
    Stats(ScanArgs),
    /// List the canonical format catalogue, groups, and registered decoders
    Formats,
}

#[derive(Args, Clone)]
pub struct ScanArgs {
    /// File paths, globs, directories, or inline content
    #[arg(required = true)]
    pub sources: Vec<String>,

    /// Canonical format name, alias, group name, `regexp:<pattern>`, or `auto`
    #[arg(long, default_value = "auto")]
    pub format: String,

    /// Minimum severity to include: debug|info|warning|error|critical
    #[arg(long, default_value = "debug")]
    pub severity_threshold: String,

    /// Swallow per-file decode errors instead of aborting the scan
    #[arg(long)]
    pub ignore_errors: bool,

    /// `log_content` shaping: full|none|smart|<integer limit>
    #[arg(long, default_value = "full")]
    pub content: String,

    /// Lines of surrounding context to attach per event (0 disables)
    #[arg(long, default_value = "0")]
    pub context_lines: u32,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub output: OutputFormat,

    /// Load scan options from a TOML config file, overriding the flags above
    #[arg(long)]
    pub config: Option<std::path::PathBuf>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// Pretty-printed JSON array
    Json,
    /// Newline-delimited JSON
    Ndjson,
    /// CSV
    Csv,
}

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gherkin-results")]
#[command(about = "A TUI for browsing Gherkin rule validation results grouped by feature")]
#[command(version)]
pub struct Cli {
    /// Report file, or a directory containing one
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Include Passed, Disabled and N/A results
    #[arg(short, long)]
    pub all: bool,

    /// Page to open first (0-based, clamped to the last page)
    #[arg(long, value_name = "N")]
    pub page: Option<usize>,

    /// Print the page and exit instead of launching the TUI
    #[arg(long)]
    pub no_tui: bool,

    /// Output format for non-interactive mode
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Reload the report when the file changes
    #[arg(short, long)]
    pub watch: bool,

    /// Config file to use instead of .gherkin-results.toml next to the report
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// JSON output is always printed, never browsed.
    pub fn interactive(&self) -> bool {
        !self.no_tui && self.format == OutputFormat::Text
    }
}

//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Flags
//!
//! - `--config <path>`: Read configuration from this file
//! - `--prompt <text>`: Override the configured prompt
//! - `--history-size <n>`: Override the configured history size
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: No banner or farewell

use clap::Parser;
use std::path::PathBuf;

/// replwork - an interactive integer calculator
#[derive(Parser, Debug)]
#[command(name = "replwork")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file to use instead of the default locations
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Prompt printed before each line
    #[arg(long, value_name = "TEXT")]
    pub prompt: Option<String>,

    /// Number of input lines kept for the history command
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub history_size: Option<i64>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

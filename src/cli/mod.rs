//! cli
//!
//! Command-line front end: an interactive integer calculator on stdin/stdout.
//!
//! # Responsibilities
//!
//! - Parse flags and load configuration
//! - Assemble the engine from the calculator command set
//! - Map run errors to the process exit status
//!
//! # Architecture
//!
//! The CLI layer is thin. Everything interactive happens inside
//! [`crate::engine::Repl`]; this module only wires it up.

pub mod args;
pub mod commands;

pub use args::Cli;

use std::io::{BufRead, Write};

use anyhow::{Context as _, Result};

use crate::core::config::{Config, ReplConfig, MAX_HISTORY_SIZE};
use crate::core::history::History;
use crate::engine::{Repl, RunError};
use crate::ui::output::{self, Verbosity};

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
    output::init_logging(cli.debug);

    let config = Config::load(cli.config.as_deref())?;
    let settings = Settings::resolve(&cli, &config.repl);

    let mut repl = build(settings, verbosity, std::io::stdin().lock(), std::io::stdout())?;
    finish(repl.run(), &mut std::io::stdout())
}

/// Effective session settings after applying flag overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub prompt: String,
    pub history_size: i64,
    pub banner: String,
    pub farewell: String,
}

impl Settings {
    /// Flags override the config file, which overrides defaults.
    pub fn resolve(cli: &Cli, config: &ReplConfig) -> Self {
        Self {
            prompt: cli
                .prompt
                .clone()
                .unwrap_or_else(|| config.prompt().to_string()),
            history_size: cli.history_size.unwrap_or_else(|| config.history_size()),
            banner: config.banner().to_string(),
            farewell: config.farewell().to_string(),
        }
    }
}

/// Assemble the calculator engine over `input` and `output`.
pub fn build<R: BufRead, W: Write>(
    settings: Settings,
    verbosity: Verbosity,
    input: R,
    output: W,
) -> Result<Repl<R, W>> {
    if settings.history_size > MAX_HISTORY_SIZE {
        anyhow::bail!(
            "invalid history size: must be at most {}, got {}",
            MAX_HISTORY_SIZE,
            settings.history_size
        );
    }
    let history = History::new(settings.history_size).context("invalid history size")?;
    let commands = commands::calculator().context("failed to build calculator commands")?;

    let mut repl = Repl::new(input, output)
        .with_prompt_text(settings.prompt)
        .with_history(history)
        .with_commands(commands);

    if verbosity != Verbosity::Quiet {
        let banner = format!("{}\n", settings.banner);
        let farewell = format!("{}\n", settings.farewell);
        repl = repl
            .with_pre_run_hook(move |_| Ok(banner.clone()))
            .with_post_run_hook(move |_| Ok(farewell.clone()));
    }

    Ok(repl)
}

/// Map the outcome of a run to the process result.
///
/// Running out of input is how a piped or Ctrl-D session ends, so it is
/// not reported as a failure.
pub fn finish(result: Result<(), RunError>, out: &mut impl Write) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(RunError::EndOfInput) => {
            writeln!(out)?;
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

//! ui::output
//!
//! Output verbosity and diagnostic logging.
//!
//! # Design
//!
//! Session output goes through the engine's writer. Diagnostics go to
//! stderr through `tracing`, so they never interleave with what a handler
//! prints on stdout.

use std::fmt::Display;
use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static LOGGING_INIT: Once = Once::new();

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - no banner or farewell
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - standard output, debug flag set
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Default log filter for the `--debug` flag.
///
/// Independent of [`Verbosity`]: `--quiet` only hides session chrome.
pub fn log_filter(debug: bool) -> &'static str {
    if debug {
        "replwork=debug"
    } else {
        "warn"
    }
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` takes precedence over the flag default. Safe to call
/// more than once; only the first call has an effect.
pub fn init_logging(debug: bool) {
    LOGGING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(log_filter(debug)));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(filter)
            .try_init();
    });
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

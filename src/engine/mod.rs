//! engine
//!
//! The read-eval-print loop and the pieces callers plug into it.
//!
//! # Architecture
//!
//! Callers describe *what* to do with a line; the engine owns *when*:
//!
//! 1. **Matchers** decide whether a command applies to a line
//! 2. **Handlers** produce output or a classified error
//! 3. **Hooks** run at fixed lifecycle points
//! 4. The **runner** drives prompt, read, dispatch and error routing
//!
//! # Invariants
//!
//! - Commands are tried front to back and the first match wins
//! - At most one handler runs per line
//! - The first fatal error or exit request ends the run
//! - Everything runs on the caller's thread, one step at a time

pub mod command;
pub mod context;
pub mod error;
pub mod matcher;
pub mod runner;

// Re-exports for convenience
pub use command::{exit_handler, usage_listing, Command, Handler, Hook, Prompter};
pub use context::{CancelHandle, Context};
pub use error::{HandlerResult, ReplError, RunError};
pub use matcher::{MatchError, Matcher};
pub use runner::Repl;

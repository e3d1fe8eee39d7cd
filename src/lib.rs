//! replwork - a reusable read-eval-print loop engine
//!
//! Callers supply matching and handling logic; the engine owns the loop:
//! prompting, reading a line, routing it to the first matching command,
//! printing results, and deciding from each outcome whether to continue,
//! exit cleanly or abort.
//!
//! # Architecture
//!
//! - [`engine`] - Dispatch loop, matchers, commands, context and errors
//! - [`core`] - Input history ring buffer and configuration loading
//! - [`ui`] - Verbosity and logging setup
//! - [`cli`] - The `replwork` calculator binary built on the engine
//!
//! # Correctness Invariants
//!
//! 1. The first matching command wins and at most one handler runs per line
//! 2. Recoverable errors print and continue; fatal errors end the run
//! 3. An exit request skips the rest of the iteration but still runs post-run
//! 4. History capacity never changes after construction
//!
//! # Example
//!
//! ```
//! use replwork::engine::{matcher, Command, ReplError, Repl};
//!
//! let input: &[u8] = b"5 / 0\nquit\n";
//! let mut repl = Repl::new(input, Vec::new())
//!     .with_prompt_text("")
//!     .with_command(Command::new(matcher::exact("quit"), |_| Err(ReplError::Exit)))
//!     .with_command(Command::new(matcher::always(), |_| {
//!         Err(ReplError::recoverable("Cannot divide by zero"))
//!     }));
//!
//! repl.run().unwrap();
//! assert_eq!(repl.output(), b"Cannot divide by zero\n");
//! ```

pub mod cli;
pub mod core;
pub mod engine;
pub mod ui;

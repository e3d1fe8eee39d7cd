//! engine::command
//!
//! Commands bind a [`Matcher`] to a handler.
//!
//! # Dispatch Contract
//!
//! Commands are tried in the order they were added. The first command whose
//! matcher accepts the line runs its handler and no later command is
//! consulted for that line.
//!
//! A *fall-through* command always matches, but its handler may return
//! [`ReplError::NoMatch`] to decline the line, in which case scanning moves
//! on to the next command. For ordinary commands a handler returning
//! `NoMatch` is treated as a handled no-op.
//!
//! # Example
//!
//! ```
//! use replwork::engine::{matcher, Command, ReplError};
//!
//! let quit = Command::new(matcher::one_of(["quit", "exit"]), |_ctx| Err(ReplError::Exit))
//!     .named("quit")
//!     .with_usage("leave the session");
//!
//! assert_eq!(quit.name(), Some("quit"));
//! ```

use std::fmt;

use super::context::Context;
use super::error::{HandlerResult, ReplError};
use super::matcher::{Always, MatchError, Matcher};

/// Boxed command handler.
pub type Handler = Box<dyn FnMut(&mut Context) -> HandlerResult>;

/// Boxed lifecycle hook.
///
/// Non-empty output is written verbatim (no newline added). Returning
/// [`ReplError::Exit`] ends the run cleanly and the post-run hook still
/// runs; this is an extension over treating every hook error as fatal.
/// Any other error aborts the run.
pub type Hook = Box<dyn FnMut(&mut Context) -> HandlerResult>;

/// Boxed prompt renderer. Any error it returns is fatal.
pub type Prompter = Box<dyn FnMut(&Context) -> HandlerResult>;

/// A matcher/handler pair plus optional help metadata.
pub struct Command {
    name: Option<String>,
    usage: Option<String>,
    matcher: Box<dyn Matcher>,
    handler: Handler,
    fallthrough: bool,
}

impl Command {
    /// Create a command from a matcher and a handler.
    pub fn new<M, H>(matcher: M, handler: H) -> Self
    where
        M: Matcher + 'static,
        H: FnMut(&mut Context) -> HandlerResult + 'static,
    {
        Self {
            name: None,
            usage: None,
            matcher: Box::new(matcher),
            handler: Box::new(handler),
            fallthrough: false,
        }
    }

    /// Create a command that sees every line and may decline with `NoMatch`.
    pub fn fallthrough<H>(handler: H) -> Self
    where
        H: FnMut(&mut Context) -> HandlerResult + 'static,
    {
        Self {
            fallthrough: true,
            ..Self::new(Always, handler)
        }
    }

    /// Set the command name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the usage text.
    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn usage(&self) -> Option<&str> {
        self.usage.as_deref()
    }

    /// Check if a handler `NoMatch` passes the line on to later commands.
    pub fn is_fallthrough(&self) -> bool {
        self.fallthrough
    }

    pub(crate) fn matches(&self, input: &str) -> Result<bool, MatchError> {
        self.matcher.matches(input)
    }

    pub(crate) fn handle(&mut self, ctx: &mut Context) -> HandlerResult {
        (self.handler)(ctx)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("usage", &self.usage)
            .field("fallthrough", &self.fallthrough)
            .finish_non_exhaustive()
    }
}

/// Render a help listing, one `name  usage` line per named command.
pub fn usage_listing(commands: &[Command]) -> String {
    let width = commands
        .iter()
        .filter_map(Command::name)
        .map(str::len)
        .max()
        .unwrap_or(0);

    commands
        .iter()
        .filter_map(|c| {
            let name = c.name()?;
            Some(match c.usage() {
                Some(usage) => format!("{:width$}  {}", name, usage, width = width),
                None => name.to_string(),
            })
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Handler that always exits. Handy for quit commands.
pub fn exit_handler(_ctx: &mut Context) -> HandlerResult {
    Err(ReplError::Exit)
}

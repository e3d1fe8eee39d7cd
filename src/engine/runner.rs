//! engine::runner
//!
//! The dispatch loop.
//!
//! # Lifecycle
//!
//! ```text
//! pre-run hook
//! loop {
//!     pre-read hook -> prompt -> read line -> dispatch -> post-eval hook
//! }
//! post-run hook (clean exit only)
//! ```
//!
//! # Error Policy
//!
//! - Recoverable handler errors are printed and the loop continues
//! - `Exit` from a handler or hook ends the loop cleanly; post-run still runs
//! - Anything else aborts the run immediately. Hooks not yet reached are
//!   skipped and the error is returned to the caller unprinted
//! - End of input is an error (`RunError::EndOfInput`)
//!
//! # Invariants
//!
//! - Exactly one handler runs per line, at most
//! - A line no command matches is dropped silently
//! - The engine never polls the cancellation handle

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use tracing::{debug, trace};

use super::command::{usage_listing, Command, Hook, Prompter};
use super::context::{CancelHandle, Context};
use super::error::{HandlerResult, ReplError, RunError};
use crate::core::config::schema::DEFAULT_PROMPT;
use crate::core::history::History;

/// Whether the loop keeps going after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Named hook points, used for logging.
#[derive(Debug, Clone, Copy)]
enum HookPoint {
    PreRun,
    PreRead,
    PostEval,
    PostRun,
}

#[derive(Default)]
struct Hooks {
    pre_run: Option<Hook>,
    pre_read: Option<Hook>,
    post_eval: Option<Hook>,
    post_run: Option<Hook>,
}

/// Interactive loop engine.
///
/// Built once with the `with_*` methods and run any number of times.
/// Each run gets a fresh [`Context`]; the command chain, hooks and history
/// carry over.
///
/// # Example
///
/// ```
/// use replwork::engine::{matcher, Command, ReplError, Repl};
///
/// let input: &[u8] = b"hello\nquit\n";
/// let mut repl = Repl::new(input, Vec::new())
///     .with_prompt_text("> ")
///     .with_command(Command::new(matcher::exact("quit"), |_| Err(ReplError::Exit)))
///     .with_command(Command::new(matcher::always(), |ctx| Ok(ctx.input().to_string())));
///
/// repl.run().unwrap();
/// assert_eq!(repl.output(), b"> hello\n> ");
/// ```
pub struct Repl<R, W> {
    input: R,
    output: W,
    commands: Vec<Command>,
    prompt: Prompter,
    hooks: Hooks,
    history: Option<History>,
    cancel: CancelHandle,
}

impl Repl<StdinLock<'static>, Stdout> {
    /// Create an engine reading stdin and writing stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Repl<R, W> {
    /// Create an engine over the given input and output.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            commands: Vec::new(),
            prompt: Box::new(|_| Ok(DEFAULT_PROMPT.to_string())),
            hooks: Hooks::default(),
            history: None,
            cancel: CancelHandle::new(),
        }
    }

    /// Append a command to the chain.
    pub fn with_command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    /// Append several commands to the chain, in order.
    pub fn with_commands(mut self, commands: impl IntoIterator<Item = Command>) -> Self {
        self.commands.extend(commands);
        self
    }

    /// Append a fall-through handler (see [`Command::fallthrough`]).
    pub fn with_handler<H>(self, handler: H) -> Self
    where
        H: FnMut(&mut Context) -> HandlerResult + 'static,
    {
        self.with_command(Command::fallthrough(handler))
    }

    /// Set the function that renders the prompt.
    pub fn with_prompt<P>(mut self, prompt: P) -> Self
    where
        P: FnMut(&Context) -> HandlerResult + 'static,
    {
        self.prompt = Box::new(prompt);
        self
    }

    /// Use a fixed prompt.
    pub fn with_prompt_text(self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.with_prompt(move |_| Ok(text.clone()))
    }

    pub fn with_pre_run_hook<H>(mut self, hook: H) -> Self
    where
        H: FnMut(&mut Context) -> HandlerResult + 'static,
    {
        self.hooks.pre_run = Some(Box::new(hook));
        self
    }

    pub fn with_pre_read_hook<H>(mut self, hook: H) -> Self
    where
        H: FnMut(&mut Context) -> HandlerResult + 'static,
    {
        self.hooks.pre_read = Some(Box::new(hook));
        self
    }

    pub fn with_post_eval_hook<H>(mut self, hook: H) -> Self
    where
        H: FnMut(&mut Context) -> HandlerResult + 'static,
    {
        self.hooks.post_eval = Some(Box::new(hook));
        self
    }

    pub fn with_post_run_hook<H>(mut self, hook: H) -> Self
    where
        H: FnMut(&mut Context) -> HandlerResult + 'static,
    {
        self.hooks.post_run = Some(Box::new(hook));
        self
    }

    /// Record every line read into `history`.
    pub fn with_history(mut self, history: History) -> Self {
        self.history = Some(history);
        self
    }

    /// Hand `cancel` to every run's context.
    pub fn with_cancellation(mut self, cancel: CancelHandle) -> Self {
        self.cancel = cancel;
        self
    }

    /// The command chain, in dispatch order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Help listing built from command names and usages.
    pub fn usage(&self) -> String {
        usage_listing(&self.commands)
    }

    pub fn history(&self) -> Option<&History> {
        self.history.as_ref()
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the loop until a command exits or an error occurs.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error: a fatal handler or hook result, a
    /// prompter failure, a matcher failure, an I/O error, or
    /// `RunError::EndOfInput` once the input is exhausted.
    pub fn run(&mut self) -> Result<(), RunError> {
        let mut ctx = Context::new(self.cancel.clone(), self.history.take());
        let result = self.run_with(&mut ctx);
        self.history = ctx.into_history();

        match &result {
            Ok(()) => debug!("run finished"),
            Err(err) => debug!(error = %err, "run aborted"),
        }
        result
    }

    fn run_with(&mut self, ctx: &mut Context) -> Result<(), RunError> {
        debug!(commands = self.commands.len(), "run started");

        if self.invoke_hook(HookPoint::PreRun, ctx)? == Flow::Continue {
            self.run_loop(ctx)?;
        }

        self.invoke_hook(HookPoint::PostRun, ctx)?;
        Ok(())
    }

    fn run_loop(&mut self, ctx: &mut Context) -> Result<(), RunError> {
        loop {
            if self.invoke_hook(HookPoint::PreRead, ctx)? == Flow::Exit {
                return Ok(());
            }

            self.print_prompt(ctx)?;

            let line = self.read_line()?;
            trace!(input = %line, "read line");
            ctx.set_input(line);

            if self.dispatch(ctx)? == Flow::Exit {
                debug!(input = %ctx.input(), "exit requested");
                return Ok(());
            }

            if self.invoke_hook(HookPoint::PostEval, ctx)? == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Route the current input through the command chain.
    fn dispatch(&mut self, ctx: &mut Context) -> Result<Flow, RunError> {
        for (index, command) in self.commands.iter_mut().enumerate() {
            if !command.matches(ctx.input())? {
                trace!(index, name = ?command.name(), "no match");
                continue;
            }

            debug!(index, name = ?command.name(), "command matched");
            match command.handle(ctx) {
                Ok(output) => {
                    if !output.is_empty() {
                        writeln!(self.output, "{}", output)?;
                    }
                }
                Err(ReplError::NoMatch) if command.is_fallthrough() => continue,
                Err(ReplError::NoMatch) => {}
                Err(ReplError::Exit) => return Ok(Flow::Exit),
                Err(ReplError::Recoverable(message)) => {
                    writeln!(self.output, "{}", message)?;
                }
                Err(err) => return Err(err.into_fatal()),
            }

            return Ok(Flow::Continue);
        }

        trace!(input = %ctx.input(), "no command matched");
        Ok(Flow::Continue)
    }

    fn invoke_hook(&mut self, point: HookPoint, ctx: &mut Context) -> Result<Flow, RunError> {
        let hook = match point {
            HookPoint::PreRun => self.hooks.pre_run.as_mut(),
            HookPoint::PreRead => self.hooks.pre_read.as_mut(),
            HookPoint::PostEval => self.hooks.post_eval.as_mut(),
            HookPoint::PostRun => self.hooks.post_run.as_mut(),
        };
        let Some(hook) = hook else {
            return Ok(Flow::Continue);
        };

        trace!(?point, "invoking hook");
        match hook(ctx) {
            Ok(text) => {
                if !text.is_empty() {
                    self.output.write_all(text.as_bytes())?;
                    self.output.flush()?;
                }
                Ok(Flow::Continue)
            }
            Err(ReplError::Exit) => {
                debug!(?point, "hook requested exit");
                Ok(Flow::Exit)
            }
            Err(err) => Err(err.into_fatal()),
        }
    }

    fn print_prompt(&mut self, ctx: &Context) -> Result<(), RunError> {
        let text = (self.prompt)(ctx).map_err(ReplError::into_fatal)?;
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    /// Read one terminated line. A trailing partial line counts as end of input.
    fn read_line(&mut self) -> Result<String, RunError> {
        let mut buf = Vec::new();
        self.input.read_until(b'\n', &mut buf)?;
        if buf.last() != Some(&b'\n') {
            return Err(RunError::EndOfInput);
        }
        Ok(String::from_utf8_lossy(&buf).trim().to_string())
    }
}

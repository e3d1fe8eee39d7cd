//! cli::commands::history
//!
//! `history [count]` lists earlier input lines.
//!
//! Only `history` on its own or followed by one argument is matched, so
//! words that merely start with `history` fall through to later commands.

use crate::engine::{matcher, Command, Context, HandlerResult, ReplError};

/// Lines accepted by the history command.
pub const PATTERN: &str = r"^history(\s+\S+)?$";

/// Lines shown when no count is given.
pub const DEFAULT_COUNT: usize = 10;

/// Build the history command.
pub fn command() -> Command {
    Command::new(matcher::pattern(PATTERN), show)
        .named("history [count]")
        .with_usage("show earlier input lines")
}

fn show(ctx: &mut Context) -> HandlerResult {
    let count = parse_count(ctx.input())?;
    let Some(history) = ctx.history() else {
        return Ok(String::new());
    };

    // Offset 0 is this very `history` line.
    let count = count.min(history.capacity().saturating_sub(1));
    let lines: Vec<String> = (1..=count)
        .rev()
        .map(|offset| (offset, history.get(offset)))
        .filter(|(_, line)| !line.is_empty())
        .map(|(offset, line)| format!("{:>4}  {}", offset, line))
        .collect();

    Ok(lines.join("\n"))
}

fn parse_count(input: &str) -> Result<usize, ReplError> {
    let rest = input.strip_prefix("history").unwrap_or(input).trim();
    if rest.is_empty() {
        return Ok(DEFAULT_COUNT);
    }

    rest.parse()
        .map_err(|_| ReplError::recoverable("usage: history [count]"))
}

//! cli::commands::arithmetic
//!
//! Two-operand integer arithmetic: `a + b`, `a - b`, `a * b` (or `x`), `a / b`.

use regex::Regex;

use crate::engine::{matcher, Command, Context, HandlerResult, ReplError};

/// Expression recognised by the arithmetic command.
///
/// Digits are ASCII only; other Unicode digits are not valid operands.
pub const EXPRESSION: &str = r"^(-?[0-9]+)\s*([-+*/x])\s*(-?[0-9]+)$";

/// Build the arithmetic command.
///
/// # Errors
///
/// Fails only if [`EXPRESSION`] does not compile.
pub fn command() -> Result<Command, regex::Error> {
    let parser = Regex::new(EXPRESSION)?;

    Ok(
        Command::new(matcher::pattern(EXPRESSION), move |ctx: &mut Context| {
            evaluate(&parser, ctx.input())
        })
        .named("<a> <op> <b>")
        .with_usage("integer arithmetic, op is one of + - * x /"),
    )
}

fn evaluate(parser: &Regex, input: &str) -> HandlerResult {
    let caps = parser
        .captures(input)
        .ok_or_else(|| ReplError::recoverable("That doesn't work."))?;

    let a = parse_operand(&caps[1])?;
    let b = parse_operand(&caps[3])?;

    let result = match &caps[2] {
        "+" => a.checked_add(b),
        "-" => a.checked_sub(b),
        "*" | "x" => a.checked_mul(b),
        "/" => {
            if b == 0 {
                return Err(ReplError::recoverable("Cannot divide by zero"));
            }
            a.checked_div(b)
        }
        op => return Err(ReplError::recoverable(format!("Unknown operator '{}'", op))),
    };

    result
        .map(|n| n.to_string())
        .ok_or_else(|| ReplError::recoverable("Result out of range"))
}

fn parse_operand(text: &str) -> Result<i64, ReplError> {
    text.parse()
        .map_err(|_| ReplError::recoverable("Result out of range"))
}

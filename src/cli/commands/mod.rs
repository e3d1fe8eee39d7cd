//! cli::commands
//!
//! The calculator command set plugged into the engine.
//!
//! # Dispatch Order
//!
//! 1. `quit` / `exit`
//! 2. `help`
//! 3. `history [count]`
//! 4. arithmetic expressions
//! 5. catch-all: anything else is reported and the session continues

pub mod arithmetic;
pub mod history;

use crate::engine::{exit_handler, matcher, usage_listing, Command, ReplError};

/// Message for lines no other command understands.
pub const UNRECOGNISED: &str = "That doesn't work.";

/// Build the full calculator command chain, in dispatch order.
///
/// # Errors
///
/// Fails only if a built-in expression does not compile.
pub fn calculator() -> Result<Vec<Command>, regex::Error> {
    let mut commands = vec![
        Command::new(matcher::one_of(["quit", "exit"]), exit_handler)
            .named("quit")
            .with_usage("leave the calculator (also: exit)"),
        help(String::new()),
        history::command(),
        arithmetic::command()?,
    ];

    // Handlers only see the context, so the listing is rendered up front.
    commands[1] = help(usage_listing(&commands));

    commands.push(Command::new(matcher::always(), |_| {
        Err(ReplError::recoverable(UNRECOGNISED))
    }));

    Ok(commands)
}

fn help(listing: String) -> Command {
    Command::new(matcher::exact("help"), move |_| Ok(listing.clone()))
        .named("help")
        .with_usage("show this listing")
}

//! Integration tests for the dispatch loop.
//!
//! These tests drive full runs over in-memory input and output and check
//! routing, error classification and hook ordering.

use std::cell::RefCell;
use std::rc::Rc;

use replwork::core::history::History;
use replwork::engine::{matcher, CancelHandle, Command, Context, Repl, ReplError, RunError};

// =============================================================================
// Test Fixtures
// =============================================================================

type Events = Rc<RefCell<Vec<String>>>;

fn engine(input: &'static str) -> Repl<&'static [u8], Vec<u8>> {
    Repl::new(input.as_bytes(), Vec::new()).with_prompt_text("")
}

fn printed<R: std::io::BufRead>(repl: &Repl<R, Vec<u8>>) -> String {
    String::from_utf8_lossy(repl.output()).into_owned()
}

fn quit() -> Command {
    Command::new(matcher::exact("quit"), |_| Err(ReplError::Exit))
}

fn echo() -> Command {
    Command::new(matcher::always(), |ctx| Ok(ctx.input().to_string()))
}

fn record(events: &Events, label: &'static str) -> impl FnMut(&mut Context) -> Result<String, ReplError> {
    let events = events.clone();
    move |ctx| {
        events.borrow_mut().push(format!("{}:{}", label, ctx.input()));
        Ok(String::new())
    }
}

// =============================================================================
// Routing
// =============================================================================

mod routing {
    use super::*;

    #[test]
    fn quit_exits_cleanly_and_echo_prints() {
        let mut repl = engine("hello\nquit\nnever read\n")
            .with_command(quit())
            .with_command(echo());

        repl.run().unwrap();
        assert_eq!(printed(&repl), "hello\n");
    }

    #[test]
    fn first_match_wins() {
        let calls: Events = Rc::default();
        let second = calls.clone();

        let mut repl = engine("x\nquit\n")
            .with_command(quit())
            .with_command(Command::new(matcher::always(), |_| Ok("first".into())))
            .with_command(Command::new(matcher::always(), move |_| {
                second.borrow_mut().push("second".into());
                Ok("second".into())
            }));

        repl.run().unwrap();
        assert_eq!(printed(&repl), "first\n");
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn unmatched_lines_are_discarded() {
        let mut repl = engine("nothing\nmatches\nquit\n")
            .with_command(quit())
            .with_command(Command::new(matcher::never(), |_| Ok("never".into())));

        repl.run().unwrap();
        assert_eq!(printed(&repl), "");
    }

    #[test]
    fn empty_chain_reads_until_end_of_input() {
        let lines: Events = Rc::default();
        let mut repl = engine("a\nb\nc\n").with_post_eval_hook(record(&lines, "eval"));

        let err = repl.run().unwrap_err();
        assert!(matches!(err, RunError::EndOfInput));
        assert_eq!(*lines.borrow(), vec!["eval:a", "eval:b", "eval:c"]);
        assert_eq!(printed(&repl), "");
    }

    #[test]
    fn input_is_trimmed_before_matching() {
        let mut repl = engine("   quit  \t\n").with_command(quit());
        repl.run().unwrap();
    }

    #[test]
    fn invalid_utf8_line_reaches_handlers() {
        let mut repl = Repl::new(&b"\xffabc\nquit\n"[..], Vec::new())
            .with_prompt_text("")
            .with_command(quit())
            .with_command(echo());

        repl.run().unwrap();
        assert_eq!(printed(&repl), "\u{fffd}abc\n");
    }

    #[test]
    fn trailing_partial_line_ends_input() {
        let mut repl = engine("hello\nquit").with_command(quit()).with_command(echo());

        let err = repl.run().unwrap_err();
        assert!(err.is_end_of_input());
        assert_eq!(printed(&repl), "hello\n");
    }

    #[test]
    fn fallthrough_handlers_can_decline() {
        let mut repl = engine("5\nquit\n")
            .with_handler(|ctx| {
                if ctx.input() == "quit" {
                    Err(ReplError::Exit)
                } else {
                    Err(ReplError::NoMatch)
                }
            })
            .with_handler(|ctx| Ok(format!("got {}", ctx.input())));

        repl.run().unwrap();
        assert_eq!(printed(&repl), "got 5\n");
    }
}

// =============================================================================
// Error Classification
// =============================================================================

mod errors {
    use super::*;

    #[test]
    fn recoverable_error_prints_and_continues() {
        let mut repl = engine("5 / 0\nquit\n")
            .with_command(quit())
            .with_command(Command::new(matcher::prefix("5"), |_| {
                Err(ReplError::recoverable("Cannot divide by zero"))
            }));

        repl.run().unwrap();
        assert_eq!(printed(&repl), "Cannot divide by zero\n");
    }

    #[test]
    fn fatal_handler_error_aborts() {
        let mut repl = engine("boom\nquit\n")
            .with_command(quit())
            .with_command(Command::new(matcher::always(), |_| {
                Err(ReplError::fatal("kaboom"))
            }))
            .with_post_run_hook(|_| Ok("unreachable".into()));

        let err = repl.run().unwrap_err();
        assert_eq!(err.to_string(), "kaboom");
        assert_eq!(printed(&repl), "");
    }

    #[test]
    fn invalid_pattern_aborts_even_if_later_command_matches() {
        let mut repl = engine("hello\n")
            .with_command(Command::new(matcher::pattern("(bad"), |_| Ok("x".into())))
            .with_command(echo());

        let err = repl.run().unwrap_err();
        assert!(matches!(err, RunError::Match(_)));
        assert!(err.to_string().contains("invalid regular expression"));
        assert_eq!(printed(&repl), "");
    }

    #[test]
    fn invalid_pattern_fails_on_every_run() {
        let mut repl = engine("hello\nhello\n")
            .with_command(Command::new(matcher::pattern("[z-a]"), |_| Ok("x".into())));

        assert!(matches!(repl.run(), Err(RunError::Match(_))));
        assert!(matches!(repl.run(), Err(RunError::Match(_))));
    }

    #[test]
    fn prompter_error_is_fatal() {
        let mut repl = engine("quit\n")
            .with_prompt(|_| Err(ReplError::recoverable("no prompt for you")))
            .with_command(quit());

        let err = repl.run().unwrap_err();
        assert!(matches!(err, RunError::Fatal(ref m) if m == "no prompt for you"));
    }

    #[test]
    fn hook_error_is_fatal() {
        let mut repl = engine("quit\n")
            .with_pre_read_hook(|_| Err(ReplError::recoverable("hook broke")))
            .with_command(quit());

        let err = repl.run().unwrap_err();
        assert_eq!(err.to_string(), "hook broke");
    }

    #[test]
    fn pre_run_failure_skips_the_loop() {
        let reads: Events = Rc::default();
        let mut repl = engine("quit\n")
            .with_pre_run_hook(|_| Err(ReplError::fatal("no start")))
            .with_pre_read_hook(record(&reads, "read"))
            .with_command(quit());

        assert!(repl.run().is_err());
        assert!(reads.borrow().is_empty());
    }
}

// =============================================================================
// Lifecycle
// =============================================================================

mod lifecycle {
    use super::*;

    #[test]
    fn hook_order_per_line() {
        let events: Events = Rc::default();
        let prompt_events = events.clone();
        let handler_events = events.clone();

        let mut repl = engine("one\nquit\n")
            .with_pre_run_hook(record(&events, "pre-run"))
            .with_pre_read_hook(record(&events, "pre-read"))
            .with_prompt(move |ctx| {
                prompt_events.borrow_mut().push(format!("prompt:{}", ctx.input()));
                Ok(String::new())
            })
            .with_post_eval_hook(record(&events, "post-eval"))
            .with_post_run_hook(record(&events, "post-run"))
            .with_command(quit())
            .with_command(Command::new(matcher::always(), move |ctx| {
                handler_events.borrow_mut().push(format!("handle:{}", ctx.input()));
                Ok(String::new())
            }));

        repl.run().unwrap();
        assert_eq!(
            *events.borrow(),
            vec![
                "pre-run:",
                "pre-read:",
                "prompt:",
                "handle:one",
                "post-eval:one",
                "pre-read:one",
                "prompt:one",
                "post-run:quit",
            ]
        );
    }

    #[test]
    fn hook_text_is_printed_verbatim() {
        let mut repl = engine("quit\n")
            .with_prompt_text(">> ")
            .with_pre_run_hook(|_| Ok("Welcome!\n".into()))
            .with_pre_read_hook(|_| Ok("Reading...".into()))
            .with_post_run_hook(|_| Ok("Farewell!\n".into()))
            .with_command(quit());

        repl.run().unwrap();
        assert_eq!(printed(&repl), "Welcome!\nReading...>> Farewell!\n");
    }

    #[test]
    fn exit_from_hook_still_runs_post_run() {
        let mut repl = engine("a\nb\n")
            .with_post_eval_hook(|_| Err(ReplError::Exit))
            .with_post_run_hook(|ctx| Ok(format!("bye after {}\n", ctx.input())))
            .with_command(echo());

        repl.run().unwrap();
        assert_eq!(printed(&repl), "a\nbye after a\n");
    }

    #[test]
    fn each_run_gets_a_fresh_context() {
        let seen: Events = Rc::default();
        let mut repl = engine("first\nquit\n")
            .with_pre_run_hook(record(&seen, "start"))
            .with_command(quit())
            .with_command(echo());

        repl.run().unwrap();
        assert!(repl.run().unwrap_err().is_end_of_input());
        assert_eq!(*seen.borrow(), vec!["start:", "start:"]);
    }
}

// =============================================================================
// History & Cancellation
// =============================================================================

mod history {
    use super::*;

    #[test]
    fn every_line_is_recorded_before_dispatch() {
        let mut repl = engine("a\nb\n!!\nquit\n")
            .with_history(History::new(5).unwrap())
            .with_command(quit())
            .with_command(Command::new(matcher::exact("!!"), |ctx| {
                Ok(ctx.recall(1).unwrap_or_default().to_string())
            }));

        repl.run().unwrap();
        assert_eq!(printed(&repl), "b\n");

        let history = repl.history().unwrap();
        assert_eq!(history.get(0), "quit");
        assert_eq!(history.get(1), "!!");
    }

    #[test]
    fn history_survives_across_runs() {
        let mut repl = engine("one\nquit\n")
            .with_history(History::new(4).unwrap())
            .with_command(quit());

        repl.run().unwrap();
        let _ = repl.run();
        assert_eq!(repl.history().unwrap().get(1), "one");
    }

    #[test]
    fn cancellation_is_advisory() {
        let cancel = CancelHandle::new();
        cancel.cancel();

        let mut repl = engine("work\nquit\n")
            .with_cancellation(cancel)
            .with_command(quit())
            .with_command(Command::new(matcher::always(), |ctx| {
                if ctx.is_cancelled() {
                    Ok("cancelled".into())
                } else {
                    Ok("working".into())
                }
            }));

        repl.run().unwrap();
        assert_eq!(printed(&repl), "cancelled\n");
    }

    #[test]
    fn cancelling_handler_can_exit() {
        let cancel = CancelHandle::new();
        let trigger = cancel.clone();

        let mut repl = engine("stop\nnever\n")
            .with_cancellation(cancel)
            .with_pre_read_hook(|ctx| {
                if ctx.cancellation().is_cancelled() {
                    Err(ReplError::Exit)
                } else {
                    Ok(String::new())
                }
            })
            .with_command(Command::new(matcher::exact("stop"), move |_| {
                trigger.cancel();
                Ok("stopping".into())
            }));

        repl.run().unwrap();
        assert_eq!(printed(&repl), "stopping\n");
    }
}

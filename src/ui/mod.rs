//! ui
//!
//! User-facing output utilities.
//!
//! # Modules
//!
//! - [`output`] - Verbosity, logging setup and error reporting

pub mod output;

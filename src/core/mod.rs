//! core
//!
//! Building blocks that do not depend on the dispatch loop.
//!
//! # Modules
//!
//! - [`history`] - Fixed-capacity ring buffer of input lines
//! - [`config`] - Configuration schema and loading

pub mod config;
pub mod history;

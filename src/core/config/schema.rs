//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Example
//!
//! ```toml
//! prompt = "calc> "
//! history_size = 50
//! banner = "Welcome!"
//! farewell = "Farewell!"
//! ```
//!
//! # Validation
//!
//! Values are validated after parsing. A history size below one or above
//! [`MAX_HISTORY_SIZE`] is rejected here rather than surfacing later as a
//! construction failure.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Prompt used when none is configured.
pub const DEFAULT_PROMPT: &str = ">> ";

/// History size used when none is configured.
pub const DEFAULT_HISTORY_SIZE: i64 = 100;

/// Largest accepted history size. The ring is allocated up front.
pub const MAX_HISTORY_SIZE: i64 = 1_000_000;

/// User configuration for an interactive session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ReplConfig {
    /// Prompt text printed before each read
    pub prompt: Option<String>,

    /// Requested size of the input history
    pub history_size: Option<i64>,

    /// Line printed once before the loop starts
    pub banner: Option<String>,

    /// Line printed once after a clean exit
    pub farewell: Option<String>,
}

impl ReplConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(size) = self.history_size {
            if size < 1 {
                return Err(ConfigError::InvalidValue(format!(
                    "history_size must be at least 1, got {}",
                    size
                )));
            }
            if size > MAX_HISTORY_SIZE {
                return Err(ConfigError::InvalidValue(format!(
                    "history_size must be at most {}, got {}",
                    MAX_HISTORY_SIZE, size
                )));
            }
        }

        Ok(())
    }

    /// Effective prompt text.
    pub fn prompt(&self) -> &str {
        self.prompt.as_deref().unwrap_or(DEFAULT_PROMPT)
    }

    /// Effective history size.
    pub fn history_size(&self) -> i64 {
        self.history_size.unwrap_or(DEFAULT_HISTORY_SIZE)
    }

    /// Effective banner line.
    pub fn banner(&self) -> &str {
        self.banner.as_deref().unwrap_or("Welcome!")
    }

    /// Effective farewell line.
    pub fn farewell(&self) -> &str {
        self.farewell.as_deref().unwrap_or("Farewell!")
    }
}

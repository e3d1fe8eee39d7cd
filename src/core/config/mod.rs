//! core::config
//!
//! Configuration schema and loading.
//!
//! # Locations
//!
//! Searched in order, the first existing file wins:
//! 1. An explicit path passed by the caller (e.g. `--config`)
//! 2. `$REPLWORK_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/replwork/config.toml`
//! 4. `~/.replwork/config.toml`
//!
//! An explicit path must exist. The other locations are optional and
//! defaults are used when none of them is present.
//!
//! # Example
//!
//! ```no_run
//! use replwork::core::config::Config;
//!
//! let config = Config::load(None).unwrap();
//! println!("Prompt: {:?}", config.repl.prompt());
//! ```

pub mod schema;

pub use schema::{ReplConfig, MAX_HISTORY_SIZE};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Loaded configuration plus where it came from.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Session configuration
    pub repl: ReplConfig,
    /// Path of the file that was loaded, if any
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `explicit` does not exist, or if a config file
    /// exists but cannot be read, parsed or validated.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }

        match Self::discover() {
            Some(path) => Self::load_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load and validate a single config file.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let repl: ReplConfig = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        repl.validate()?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(Self {
            repl,
            path: Some(path.to_path_buf()),
        })
    }

    /// Path of the loaded file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Find the first config file present in the standard locations.
    fn discover() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("REPLWORK_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("replwork/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        dirs::home_dir()
            .map(|home| home.join(".replwork/config.toml"))
            .filter(|path| path.exists())
    }
}

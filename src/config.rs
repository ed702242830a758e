//! Solver configuration
//!
//! Defaults, optionally overridden by a JSON file and then by command-line
//! flags.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::algorithm::available_threads;

use crate::algorithm::MAX_COUNTER;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("File I/O error: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    InvalidFormat(#[from] serde_json::Error),

    #[error("Thread count must be at least 1")]
    InvalidThreads,
}

/// How the counter space is scanned
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Single thread, lowest accepted nonce first
    Sequential,
    /// Strided across worker threads, first finder wins
    #[default]
    Parallel,
}

/// Solver settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    pub mode: Mode,
    /// Worker threads in parallel mode (None: one per CPU)
    pub threads: Option<usize>,
    /// Give up after this many seconds (None: run until found or exhausted)
    pub timeout_secs: Option<u64>,
    /// Only try nonces below this counter
    pub limit: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Parallel,
            threads: None,
            timeout_secs: None,
            limit: MAX_COUNTER,
        }
    }
}

impl SolverConfig {
    /// Load and validate a JSON config file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threads == Some(0) {
            return Err(ConfigError::InvalidThreads);
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Workers a search with this config spawns
    pub fn worker_threads(&self) -> usize {
        match (self.mode, self.threads) {
            (Mode::Sequential, _) => 1,
            (Mode::Parallel, Some(threads)) => threads.max(1),
            (Mode::Parallel, None) => available_threads(),
        }
    }
}

/// Get the default config file path
#[cfg(feature = "cli")]
pub fn default_config_path() -> std::path::PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| std::path::PathBuf::from("."));
    home.join(".powsolve").join("config.json")
}

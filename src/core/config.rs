//! Logger configuration
//!
//! [`LoggerConfig`] carries every knob of a [`Logger`](crate::Logger). It is
//! plain data so a host application can embed it in its own configuration
//! format; [`LoggerConfig::from_json`] covers the common case.

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default rotation threshold: 1 MiB
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Name of the file reused across runs in append mode
pub const APPEND_FILE_NAME: &str = "log.txt";

/// Prefix of the per-session file name in non-append mode
pub const SESSION_FILE_PREFIX: &str = "log_";

/// Extension of every log file, rotated ones included
pub const LOG_FILE_EXTENSION: &str = "txt";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub console_enabled: bool,
    pub file_enabled: bool,
    /// Append to `log.txt` across runs instead of starting a stamped file
    pub append: bool,
    pub max_file_size: u64,
    /// Directory holding the log files
    pub log_dir: PathBuf,
    pub use_colors: bool,
    /// Capture a backtrace per call to name the caller
    pub resolve_callers: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Debug,
            console_enabled: true,
            file_enabled: true,
            append: true,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            log_dir: PathBuf::from("."),
            use_colors: true,
            resolve_callers: true,
        }
    }
}

impl LoggerConfig {
    /// Parse a configuration, filling absent fields with defaults.
    ///
    /// ```
    /// use leveled_logger::{LoggerConfig, LogLevel};
    ///
    /// let config = LoggerConfig::from_json(r#"{ "level": "WARNING", "append": false }"#).unwrap();
    /// assert_eq!(config.level, LogLevel::Warning);
    /// assert!(!config.append);
    /// assert!(config.console_enabled);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LoggerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_file_size == 0 {
            return Err(LoggerError::config(
                "LoggerConfig",
                "max_file_size must be greater than zero",
            ));
        }
        Ok(())
    }
}

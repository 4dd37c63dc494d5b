//! Log level definitions

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a record, doubling as the logger's threshold.
///
/// The raw values match the integer protocol accepted by
/// [`Logger::set_log_level`](crate::Logger::set_log_level):
/// `DEBUG=0, INFO=1, WARNING=2, ERROR=3, OFF=-1`.
///
/// `Off` is only meaningful as a threshold. Comparisons between levels go
/// through [`LogLevel::permits`] rather than `Ord`, because `Off` sits below
/// `Debug` numerically but silences everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    #[default]
    Debug = 0,
    Info = 1,
    Warning = 2,
    Error = 3,
    Off = -1,
}

impl LogLevel {
    /// Levels a record can be emitted at, lowest first.
    pub const RECORD_LEVELS: [LogLevel; 4] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Off => "OFF",
        }
    }

    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Whether a call at `level` passes this threshold.
    ///
    /// ```
    /// use leveled_logger::LogLevel;
    ///
    /// assert!(LogLevel::Info.permits(LogLevel::Error));
    /// assert!(!LogLevel::Info.permits(LogLevel::Debug));
    /// assert!(!LogLevel::Off.permits(LogLevel::Error));
    /// assert!(!LogLevel::Debug.permits(LogLevel::Off));
    /// ```
    #[must_use]
    pub fn permits(self, level: LogLevel) -> bool {
        self != LogLevel::Off && level != LogLevel::Off && level.as_i32() >= self.as_i32()
    }

    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Debug => Magenta,
            LogLevel::Info => Cyan,
            LogLevel::Warning => Yellow,
            LogLevel::Error => Red,
            LogLevel::Off => Cyan,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl TryFrom<i32> for LogLevel {
    type Error = LoggerError;

    fn try_from(value: i32) -> Result<Self, LoggerError> {
        match value {
            0 => Ok(LogLevel::Debug),
            1 => Ok(LogLevel::Info),
            2 => Ok(LogLevel::Warning),
            3 => Ok(LogLevel::Error),
            -1 => Ok(LogLevel::Off),
            other => Err(LoggerError::InvalidLevel(other)),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            "OFF" => Ok(LogLevel::Off),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

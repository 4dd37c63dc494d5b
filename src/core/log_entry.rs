//! Log record structure

use super::log_level::LogLevel;
use chrono::{DateTime, Local};

/// One log call, captured before formatting. Never persisted as-is.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub logger_name: String,
    pub caller: String,
    pub message: String,
}

impl LogRecord {
    /// Escape line breaks and tabs so one record always renders as one line.
    ///
    /// Keeps a caller from forging extra records and keeps the byte count of
    /// the file equal to the sum of the lines written to it.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(
        timestamp: DateTime<Local>,
        level: LogLevel,
        logger_name: impl Into<String>,
        caller: impl Into<String>,
        message: &str,
    ) -> Self {
        Self {
            timestamp,
            level,
            logger_name: logger_name.into(),
            caller: caller.into(),
            message: Self::sanitize_message(message),
        }
    }
}

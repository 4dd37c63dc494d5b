//! Fixed-column line rendering
//!
//! Every line has the shape
//!
//! ```text
//! 2025-01-08 10:30:45 [INFO]    [Worker.run]                     started
//! ```
//!
//! timestamp, `[LEVEL]` left-aligned in 9 columns, `[logger.caller]`
//! left-aligned in 32 columns, then the message as-is. Fields wider than
//! their column are never truncated. Color is applied by the console sink
//! only, so the same string goes to the file.

use super::log_entry::LogRecord;
use super::log_level::LogLevel;
use super::timestamp::{LINE_TIMESTAMP_PATTERN, TIMESTAMP_WIDTH};

pub const LEVEL_WIDTH: usize = 9;
pub const IDENTITY_WIDTH: usize = 32;

#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormatter;

impl LineFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format(&self, record: &LogRecord) -> String {
        let timestamp = record.timestamp.format(LINE_TIMESTAMP_PATTERN).to_string();
        let identity = format!("[{}.{}]", record.logger_name, record.caller);
        Self::columns(&timestamp, record.level, &identity, &record.message)
    }

    /// A line with the timestamp column left blank and no caller, used when
    /// the logger announces it is switching itself off.
    pub fn format_unstamped(&self, level: LogLevel, logger_name: &str, message: &str) -> String {
        let identity = format!("[{}]", logger_name);
        Self::columns("", level, &identity, message)
    }

    fn columns(timestamp: &str, level: LogLevel, identity: &str, message: &str) -> String {
        format!(
            "{:<ts$} {:<lw$} {:<iw$} {}",
            timestamp,
            format!("[{}]", level.to_str()),
            identity,
            message,
            ts = TIMESTAMP_WIDTH,
            lw = LEVEL_WIDTH,
            iw = IDENTITY_WIDTH,
        )
    }
}

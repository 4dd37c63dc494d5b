//! Core logger types

pub mod caller;
pub mod config;
pub mod error;
pub mod formatter;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod timestamp;

pub use caller::{CallerResolver, UNKNOWN_CALLER};
pub use config::{LoggerConfig, DEFAULT_MAX_FILE_SIZE};
pub use error::{LoggerError, Result};
pub use formatter::LineFormatter;
pub use log_entry::LogRecord;
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use timestamp::{
    Clock, FixedClock, SystemClock, FILE_STAMP_PATTERN, LINE_TIMESTAMP_PATTERN,
};

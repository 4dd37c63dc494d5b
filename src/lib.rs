//! # Leveled Logger
//!
//! A lightweight leveled logger writing fixed-column lines to a colored
//! console and to a size-rotated log file.
//!
//! ## Features
//!
//! - **Levels**: DEBUG, INFO, WARNING, ERROR and OFF, changeable at run time
//! - **Rotation**: `log.txt` rolls over to `log_part1.txt`, `log_part2.txt`, ...
//! - **Caller names**: every line names the function that logged it
//! - **Never fails the host**: file problems fall back to console-only output
//!
//! ```no_run
//! use leveled_logger::prelude::*;
//! use leveled_logger::info;
//! use std::sync::Arc;
//!
//! let logger = Arc::new(Logger::new("Worker"));
//!
//! fn run(logger: &Logger) {
//!     info!(logger, "started");
//!     // 2025-01-08 10:30:45 [INFO]    [Worker.run]                     started
//! }
//!
//! run(&logger);
//! logger.close();
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{CaptureBuffer, ConsoleAppender, FileState};
    pub use crate::core::{
        CallerResolver, Clock, FixedClock, LogLevel, LogRecord, Logger, LoggerBuilder,
        LoggerConfig, LoggerError, LoggerMetrics, Result, SystemClock,
    };
}

pub use appenders::{CaptureBuffer, ConsoleAppender, FileState, RotatingFileAppender};
pub use core::{
    CallerResolver, Clock, FixedClock, LineFormatter, LogLevel, LogRecord, Logger,
    LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Result, SystemClock,
    DEFAULT_MAX_FILE_SIZE, FILE_STAMP_PATTERN, LINE_TIMESTAMP_PATTERN, UNKNOWN_CALLER,
};

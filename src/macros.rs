//! Logging macros for ergonomic log message formatting.
//!
//! These macros format their arguments like `format!`, but only once the
//! level filter has let the call through, and name the caller after the
//! function they are written in, resolved at compile time. They are the
//! preferred entry points: unlike the plain `Logger::info(..)` style methods
//! they never capture a backtrace.
//!
//! # Examples
//!
//! ```
//! use leveled_logger::prelude::*;
//! use leveled_logger::{info, warning};
//!
//! let logger = Logger::builder("Server").file_enabled(false).build();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! warning!(logger, "{} connections pending", 3);
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let logger = Logger::builder("Doc").file_enabled(false).build();
/// use leveled_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_fmt($crate::caller_name!(), $level, ::std::format_args!($($arg)+))
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let logger = Logger::builder("Doc").file_enabled(false).build();
/// use leveled_logger::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let logger = Logger::builder("Doc").file_enabled(false).build();
/// use leveled_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let logger = Logger::builder("Doc").file_enabled(false).build();
/// use leveled_logger::warning;
/// warning!(logger, "Memory usage at {}%", 85);
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let logger = Logger::builder("Doc").file_enabled(false).build();
/// use leveled_logger::error;
/// error!(logger, "Failed to connect to {}", "database");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::{debug, error, info, log, warning};
    use std::cell::Cell;
    use std::fmt;

    fn logger() -> (Logger, CaptureBuffer) {
        let buffer = CaptureBuffer::new();
        let logger = Logger::builder("Macro")
            .file_enabled(false)
            .use_colors(false)
            .console(ConsoleAppender::with_writer(buffer.clone()))
            .build();
        (logger, buffer)
    }

    fn run(logger: &Logger) {
        info!(logger, "started");
    }

    #[test]
    fn test_macros_name_enclosing_function() {
        let (logger, buffer) = logger();
        run(&logger);
        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains(&format!("[INFO]    {:<32} started", "[Macro.run]")));
    }

    #[test]
    fn test_all_levels() {
        let (logger, buffer) = logger();
        debug!(logger, "d {}", 1);
        info!(logger, "i {}", 2);
        warning!(logger, "w {}", 3);
        error!(logger, "e {}", 4);
        log!(logger, LogLevel::Info, "direct");

        let lines = buffer.lines();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("[DEBUG]") && lines[0].ends_with("d 1"));
        assert!(lines[3].contains("[ERROR]") && lines[3].ends_with("e 4"));
        assert!(lines[4].contains("[Macro.test_all_levels]"));
    }

    #[test]
    fn test_filtered_macro_skips_formatting() {
        struct Probe<'a>(&'a Cell<bool>);

        impl fmt::Display for Probe<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.set(true);
                write!(f, "expensive")
            }
        }

        let (logger, buffer) = logger();
        logger.set_level(LogLevel::Error);
        buffer.clear();

        let formatted = Cell::new(false);
        debug!(logger, "{}", Probe(&formatted));
        assert!(!formatted.get());
        assert!(buffer.is_empty());
        assert_eq!(logger.metrics().records_suppressed(), 1);

        error!(logger, "{}", Probe(&formatted));
        assert!(formatted.get());
    }
}

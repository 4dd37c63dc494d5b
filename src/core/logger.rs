//! Main logger implementation
//!
//! A [`Logger`] is an explicitly constructed, named instance. It is `Send +
//! Sync`; share one across threads with `Arc<Logger>` and pass it to the code
//! that logs. Every call runs synchronously on the calling thread.
//!
//! Locking: configuration sits behind an `RwLock`, the console and the file
//! sink each behind their own `Mutex`. No two of these are ever held at once,
//! so writers on different threads cannot deadlock; the file lock alone
//! serializes size checks, rotation, writes and close.

use super::{
    caller::CallerResolver,
    config::LoggerConfig,
    formatter::LineFormatter,
    log_entry::LogRecord,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    timestamp::{Clock, SystemClock},
    LoggerError,
};
use crate::appenders::{ConsoleAppender, FileState, RotatingFileAppender};
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const OFF_NOTICE: &str = "Logging is now turned OFF.";

pub struct Logger {
    name: String,
    config: RwLock<LoggerConfig>,
    /// File logging was switched off by a failure rather than by the user
    file_disabled_by_failure: AtomicBool,
    console: Mutex<ConsoleAppender>,
    file: Mutex<RotatingFileAppender>,
    formatter: LineFormatter,
    resolver: CallerResolver,
    clock: Arc<dyn Clock>,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Create a logger with the default configuration: DEBUG threshold,
    /// console and file output, appending to `./log.txt`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::builder(name).build()
    }

    #[must_use]
    pub fn with_config(name: impl Into<String>, config: LoggerConfig) -> Self {
        Self::builder(name).config(config).build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // --- Level management ---

    pub fn level(&self) -> LogLevel {
        self.config.read().level
    }

    /// Raw threshold value, `-1` when logging is off
    pub fn log_level(&self) -> i32 {
        self.level().as_i32()
    }

    pub fn log_level_string(&self) -> &'static str {
        self.level().to_str()
    }

    /// Whether a call at `level` would currently be emitted
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.level().permits(level)
    }

    /// Change the threshold.
    ///
    /// A new non-OFF threshold is announced with an INFO record before it
    /// takes effect, so the announcement passes or fails the *current*
    /// threshold; leaving OFF is silent. Switching to OFF prints a single
    /// console line first, with a blank timestamp column.
    pub fn set_level(&self, level: LogLevel) {
        let current = self.level();
        if level == LogLevel::Off {
            if current != LogLevel::Off {
                self.announce_off();
            }
        } else if current.permits(LogLevel::Info) {
            let caller = self.resolver.resolve();
            self.emit(LogLevel::Info, &caller, &format!("Log level set to: {}", level));
        }
        self.config.write().level = level;
    }

    /// Change the threshold from its raw value (`0..=3`, or `-1` for OFF).
    ///
    /// An out-of-range value reports one ERROR and one WARNING record and
    /// switches logging off. While logging is already off, an out-of-range
    /// value is ignored without output.
    pub fn set_log_level(&self, raw: i32) {
        match LogLevel::try_from(raw) {
            Ok(level) => self.set_level(level),
            Err(err) => {
                if self.level() == LogLevel::Off {
                    return;
                }
                let caller = self.resolver.resolve();
                self.emit(LogLevel::Error, &caller, &err.to_string());
                self.emit(
                    LogLevel::Warning,
                    &caller,
                    "Automatic resolution: Set log level to -1",
                );
                self.config.write().level = LogLevel::Off;
            }
        }
    }

    fn announce_off(&self) {
        if !self.config.read().console_enabled {
            return;
        }
        let line = self
            .formatter
            .format_unstamped(LogLevel::Info, &self.name, OFF_NOTICE);
        self.console.lock().append(LogLevel::Info, &line);
        self.metrics.record_console_write();
    }

    // --- Configuration ---

    /// Rotation threshold in bytes, applied from the next write. Zero is
    /// raised to one byte.
    pub fn set_max_file_size(&self, bytes: u64) {
        let bytes = bytes.max(1);
        self.config.write().max_file_size = bytes;
        self.file.lock().set_max_bytes(bytes);
    }

    pub fn max_file_size(&self) -> u64 {
        self.config.read().max_file_size
    }

    pub fn set_file_logging_enabled(&self, enabled: bool) {
        self.config.write().file_enabled = enabled;
        self.file_disabled_by_failure.store(false, Ordering::Relaxed);
    }

    /// False while the file sink is failed, even if file logging was
    /// switched back on; the sink recovers through `set_append_to_file`.
    pub fn is_file_logging_enabled(&self) -> bool {
        let enabled = self.config.read().file_enabled;
        enabled && self.file_state() != FileState::Failed
    }

    pub fn set_console_logging_enabled(&self, enabled: bool) {
        self.config.write().console_enabled = enabled;
    }

    pub fn is_console_logging_enabled(&self) -> bool {
        self.config.read().console_enabled
    }

    /// Switch between appending to `log.txt` and a per-session stamped file.
    ///
    /// Always closes the current file and starts over at part 0, clearing a
    /// previous file failure. File logging switched off by that failure is
    /// switched back on once the new file opens.
    pub fn set_append_to_file(&self, append: bool) {
        let open_now = {
            let mut config = self.config.write();
            config.append = append;
            config.file_enabled || self.file_disabled_by_failure.load(Ordering::Relaxed)
        };

        let result = self.file.lock().reinitialize(append, open_now);
        match result {
            Ok(()) => {
                if self.file_disabled_by_failure.swap(false, Ordering::Relaxed) {
                    self.config.write().file_enabled = true;
                }
            }
            Err(e) => self.disable_file_logging(&e),
        }
    }

    pub fn is_append_to_file(&self) -> bool {
        self.config.read().append
    }

    /// Snapshot of the current configuration
    pub fn config(&self) -> LoggerConfig {
        self.config.read().clone()
    }

    // --- File sink state ---

    pub fn current_log_path(&self) -> Option<PathBuf> {
        self.file.lock().path().map(|p| p.to_path_buf())
    }

    pub fn part_index(&self) -> u32 {
        self.file.lock().part_index()
    }

    pub fn file_state(&self) -> FileState {
        self.file.lock().state()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Flush and release the log file. Safe to call more than once; a close
    /// error is reported on the console and otherwise ignored.
    pub fn close(&self) {
        let result = self.file.lock().close();
        let mut console = self.console.lock();
        if let Err(e) = result {
            console.error_notice(&format!("Logger: Error closing log file: {}", e));
        }
        console.flush();
    }

    // --- Logging ---

    /// Log at `level`, naming the caller from the current stack.
    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        if !self.is_enabled(level) {
            self.metrics.record_suppressed();
            return;
        }
        let caller = self.resolver.resolve();
        self.emit(level, &caller, message.as_ref());
    }

    /// Log at `level` on behalf of an explicitly named caller.
    ///
    /// The logging macros use this with the enclosing function's name.
    pub fn log_from(&self, caller: &str, level: LogLevel, message: impl AsRef<str>) {
        if !self.is_enabled(level) {
            self.metrics.record_suppressed();
            return;
        }
        self.emit(level, caller, message.as_ref());
    }

    /// [`log_from`](Self::log_from) with deferred formatting; the arguments
    /// are only rendered if the level passes.
    pub fn log_fmt(&self, caller: &str, level: LogLevel, args: fmt::Arguments<'_>) {
        if !self.is_enabled(level) {
            self.metrics.record_suppressed();
            return;
        }
        match args.as_str() {
            Some(message) => self.emit(level, caller, message),
            None => self.emit(level, caller, &args.to_string()),
        }
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    pub fn warning(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warning, message);
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }

    /// Format a record and hand it to the enabled sinks. No level check.
    fn emit(&self, level: LogLevel, caller: &str, message: &str) {
        self.metrics.record_emitted();
        let record = LogRecord::new(self.clock.now(), level, self.name.as_str(), caller, message);
        let line = self.formatter.format(&record);

        let (console_enabled, file_enabled) = {
            let config = self.config.read();
            (config.console_enabled, config.file_enabled)
        };

        if console_enabled {
            self.console.lock().append(level, &line);
            self.metrics.record_console_write();
        }
        if file_enabled {
            self.write_file(&line);
        }
    }

    fn write_file(&self, line: &str) {
        let result = {
            let mut file = self.file.lock();
            if matches!(file.state(), FileState::Failed | FileState::Closed) {
                return;
            }
            self.metrics.record_file_attempt();
            file.write_line(line)
        };

        match result {
            Ok(outcome) => {
                self.metrics.record_file_write();
                if let Some(path) = outcome.rotated_to {
                    self.metrics.record_rotation();
                    self.console
                        .lock()
                        .notice(&format!("Logger: Log file rotated to {}", path.display()));
                }
            }
            Err(e) => self.disable_file_logging(&e),
        }
    }

    /// Sticky failure: file logging stays off until `set_append_to_file`.
    fn disable_file_logging(&self, error: &LoggerError) {
        self.config.write().file_enabled = false;
        self.file_disabled_by_failure.store(true, Ordering::Relaxed);
        self.metrics.record_file_failure();

        let notice = match error {
            LoggerError::FileOpen { .. } => format!(
                "Logger: Failed to initialize log file. File logging disabled. Error: {}",
                error
            ),
            _ => format!(
                "Logger: Error writing to log file. File logging disabled. Error: {}",
                error
            ),
        };
        self.console.lock().error_notice(&notice);
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.close();
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```no_run
/// use leveled_logger::prelude::*;
///
/// let logger = Logger::builder("Worker")
///     .level(LogLevel::Info)
///     .log_dir("logs")
///     .append(false)
///     .max_file_size(512 * 1024)
///     .build();
/// logger.info("started");
/// ```
pub struct LoggerBuilder {
    name: String,
    config: LoggerConfig,
    console: Option<ConsoleAppender>,
    clock: Option<Arc<dyn Clock>>,
    resolver: Option<CallerResolver>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: LoggerConfig::default(),
            console: None,
            clock: None,
            resolver: None,
        }
    }

    /// Replace every setting at once
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console_enabled(mut self, enabled: bool) -> Self {
        self.config.console_enabled = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn file_enabled(mut self, enabled: bool) -> Self {
        self.config.file_enabled = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn append(mut self, append: bool) -> Self {
        self.config.append = append;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.config.max_file_size = bytes;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.log_dir = dir.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn use_colors(mut self, use_colors: bool) -> Self {
        self.config.use_colors = use_colors;
        self
    }

    /// Turn backtrace-based caller naming on or off. Off reports every
    /// caller of the plain methods as `UnknownMethod`; the macros are
    /// unaffected.
    #[must_use = "builder methods return a new value"]
    pub fn resolve_callers(mut self, enabled: bool) -> Self {
        self.config.resolve_callers = enabled;
        self
    }

    /// Console destination, standard output/error by default
    #[must_use = "builder methods return a new value"]
    pub fn console(mut self, console: ConsoleAppender) -> Self {
        self.console = Some(console);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Overrides `resolve_callers`
    #[must_use = "builder methods return a new value"]
    pub fn caller_resolver(mut self, resolver: CallerResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Build the Logger, opening the log file if file logging is enabled.
    ///
    /// Never fails: an unusable log file disables file logging and is
    /// reported on the console.
    pub fn build(self) -> Logger {
        let mut config = self.config;
        config.max_file_size = config.max_file_size.max(1);
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let resolver = self.resolver.unwrap_or_else(|| {
            if config.resolve_callers {
                CallerResolver::new()
            } else {
                CallerResolver::disabled()
            }
        });
        let mut console = self.console.unwrap_or_default();
        console.set_colors(config.use_colors);

        let file = RotatingFileAppender::new(
            config.log_dir.clone(),
            config.append,
            config.max_file_size,
            Arc::clone(&clock),
        );
        let open_now = config.file_enabled;

        let logger = Logger {
            name: self.name,
            config: RwLock::new(config),
            file_disabled_by_failure: AtomicBool::new(false),
            console: Mutex::new(console),
            file: Mutex::new(file),
            formatter: LineFormatter::new(),
            resolver,
            clock,
            metrics: LoggerMetrics::new(),
        };

        if open_now {
            let result = logger.file.lock().open();
            if let Err(e) = result {
                logger.disable_file_logging(&e);
            }
        }
        logger
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::CaptureBuffer;
    use crate::core::timestamp::FixedClock;
    use chrono::{Local, TimeZone};
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn fixed_clock() -> FixedClock {
        FixedClock::new(
            Local
                .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
                .single()
                .expect("valid datetime"),
        )
    }

    fn test_logger(dir: &TempDir) -> (Logger, CaptureBuffer) {
        let buffer = CaptureBuffer::new();
        let logger = Logger::builder("Unit")
            .log_dir(dir.path())
            .use_colors(false)
            .console(ConsoleAppender::with_writer(buffer.clone()))
            .clock(fixed_clock())
            .build();
        (logger, buffer)
    }

    #[test]
    fn test_builder_defaults() {
        let dir = tempdir().unwrap();
        let (logger, _) = test_logger(&dir);
        assert_eq!(logger.name(), "Unit");
        assert_eq!(logger.level(), LogLevel::Debug);
        assert_eq!(logger.log_level(), 0);
        assert!(logger.is_append_to_file());
        assert!(logger.is_console_logging_enabled());
        assert!(logger.is_file_logging_enabled());
        assert_eq!(logger.max_file_size(), 1024 * 1024);
        assert_eq!(logger.file_state(), FileState::Open);
        assert_eq!(logger.current_log_path(), Some(dir.path().join("log.txt")));
    }

    #[test]
    fn test_file_disabled_does_not_create_file() {
        let dir = tempdir().unwrap();
        let logger = Logger::builder("Quiet")
            .log_dir(dir.path())
            .file_enabled(false)
            .console(ConsoleAppender::with_writer(CaptureBuffer::new()))
            .build();
        logger.info("console only");
        assert_eq!(logger.file_state(), FileState::Uninitialized);
        assert!(!dir.path().join("log.txt").exists());
    }

    #[test]
    fn test_same_line_on_console_and_file() {
        let dir = tempdir().unwrap();
        let (logger, buffer) = test_logger(&dir);
        logger.log_from("handler", LogLevel::Warning, "disk at 91%");
        logger.close();

        let file = fs::read_to_string(dir.path().join("log.txt")).unwrap();
        assert_eq!(buffer.contents(), file);
        assert!(file.starts_with("2025-01-08 10:30:45 [WARNING] [Unit.handler]"));
        assert!(file.ends_with(" disk at 91%\n"));
    }

    #[test]
    fn test_level_change_is_announced_at_current_threshold() {
        let dir = tempdir().unwrap();
        let (logger, buffer) = test_logger(&dir);

        logger.set_level(LogLevel::Error);
        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("[INFO]"));
        assert!(lines[0].ends_with("Log level set to: ERROR"));
        assert_eq!(logger.log_level_string(), "ERROR");

        buffer.clear();
        logger.set_level(LogLevel::Debug);
        assert!(buffer.is_empty());
        assert_eq!(logger.level(), LogLevel::Debug);
    }

    #[test]
    fn test_leaving_off_is_silent() {
        let dir = tempdir().unwrap();
        let (logger, buffer) = test_logger(&dir);
        logger.set_level(LogLevel::Off);
        buffer.clear();

        logger.set_level(LogLevel::Debug);
        assert!(buffer.is_empty());
        assert_eq!(logger.level(), LogLevel::Debug);
    }

    #[test]
    fn test_off_notice_has_blank_timestamp() {
        let dir = tempdir().unwrap();
        let (logger, buffer) = test_logger(&dir);

        logger.set_level(LogLevel::Off);
        logger.set_level(LogLevel::Off);
        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with(&" ".repeat(20)));
        assert!(lines[0].contains("[Unit]"));
        assert!(lines[0].ends_with(OFF_NOTICE));

        // Console only
        logger.close();
        let file = fs::read_to_string(dir.path().join("log.txt")).unwrap();
        assert!(file.is_empty());
    }

    #[test]
    fn test_invalid_level_falls_back_to_off() {
        let dir = tempdir().unwrap();
        let (logger, buffer) = test_logger(&dir);
        logger.set_level(LogLevel::Error);
        buffer.clear();

        logger.set_log_level(9);
        assert_eq!(logger.level(), LogLevel::Off);
        assert_eq!(logger.log_level(), -1);
        let lines = buffer.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("[ERROR]") && lines[0].ends_with("Invalid log level: 9"));
        assert!(lines[1].contains("[WARNING]"));
        assert!(lines[1].ends_with("Automatic resolution: Set log level to -1"));

        buffer.clear();
        logger.set_log_level(-5);
        assert!(buffer.is_empty());
        assert_eq!(logger.level(), LogLevel::Off);
    }

    #[test]
    fn test_suppressed_calls_are_counted() {
        let dir = tempdir().unwrap();
        let (logger, _) = test_logger(&dir);
        logger.set_level(LogLevel::Warning);
        let emitted = logger.metrics().records_emitted();
        logger.log_from("f", LogLevel::Debug, "hidden");
        logger.log_from("f", LogLevel::Off, "never");
        logger.log_from("f", LogLevel::Error, "shown");
        assert_eq!(logger.metrics().records_suppressed(), 2);
        assert_eq!(logger.metrics().records_emitted(), emitted + 1);
    }

    #[test]
    fn test_open_failure_disables_file_logging() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let buffer = CaptureBuffer::new();
        let logger = Logger::builder("Broken")
            .log_dir(&blocker)
            .use_colors(false)
            .console(ConsoleAppender::with_writer(buffer.clone()))
            .build();

        assert_eq!(logger.file_state(), FileState::Failed);
        assert!(!logger.is_file_logging_enabled());
        assert_eq!(logger.metrics().file_failures(), 1);
        assert!(buffer
            .contents()
            .contains("Logger: Failed to initialize log file. File logging disabled."));

        logger.log_from("f", LogLevel::Info, "still on console");
        assert_eq!(logger.metrics().file_write_attempts(), 0);
        assert!(buffer.contents().contains("still on console"));
    }

    #[test]
    fn test_close_is_idempotent() {
        let dir = tempdir().unwrap();
        let (logger, buffer) = test_logger(&dir);
        logger.close();
        logger.close();
        assert_eq!(logger.file_state(), FileState::Closed);
        assert!(!buffer.contents().contains("Error closing"));
    }

    #[test]
    fn test_resolved_caller_falls_back_inside_facility() {
        let dir = tempdir().unwrap();
        let buffer = CaptureBuffer::new();
        let logger = Logger::builder("Unit")
            .log_dir(dir.path())
            .file_enabled(false)
            .use_colors(false)
            .resolve_callers(false)
            .console(ConsoleAppender::with_writer(buffer.clone()))
            .build();
        logger.info("who called");
        assert!(buffer.contents().contains("[Unit.UnknownMethod]"));
    }

    #[test]
    fn test_zero_max_size_is_raised_at_build() {
        let dir = tempdir().unwrap();
        let logger = Logger::builder("Tiny")
            .log_dir(dir.path())
            .max_file_size(0)
            .console(ConsoleAppender::with_writer(CaptureBuffer::new()))
            .build();
        assert_eq!(logger.max_file_size(), 1);
        assert_eq!(logger.config().max_file_size, 1);

        let config = LoggerConfig {
            max_file_size: 0,
            log_dir: dir.path().to_path_buf(),
            ..LoggerConfig::default()
        };
        let from_config = Logger::with_config("Tiny", config);
        assert_eq!(from_config.max_file_size(), 1);
    }

    #[test]
    fn test_failed_sink_reports_file_logging_off_until_reinit() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let buffer = CaptureBuffer::new();
        let logger = Logger::builder("Broken")
            .log_dir(&blocker)
            .use_colors(false)
            .console(ConsoleAppender::with_writer(buffer.clone()))
            .build();
        assert_eq!(logger.file_state(), FileState::Failed);

        logger.set_file_logging_enabled(true);
        assert!(!logger.is_file_logging_enabled());
        logger.log_from("f", LogLevel::Info, "console only");
        assert_eq!(logger.metrics().file_write_attempts(), 0);

        fs::remove_file(&blocker).unwrap();
        logger.set_append_to_file(true);
        assert_eq!(logger.file_state(), FileState::Open);
        assert!(logger.is_file_logging_enabled());
    }
}

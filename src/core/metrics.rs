//! Logger metrics for observability
//!
//! Counters describing what the logger did with the calls it received:
//! how many were emitted or filtered, and how the file sink fared.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use leveled_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_emitted();
/// metrics.record_suppressed();
///
/// assert_eq!(metrics.records_emitted(), 1);
/// assert_eq!(metrics.records_suppressed(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records that passed the level filter
    records_emitted: AtomicU64,

    /// Calls rejected by the level filter
    records_suppressed: AtomicU64,

    /// Lines handed to the console sink
    console_writes: AtomicU64,

    /// Times the file sink was asked to write a line
    file_write_attempts: AtomicU64,

    /// Lines durably written to a log file
    file_writes: AtomicU64,

    /// Open, write or rotation failures that disabled file logging
    file_failures: AtomicU64,

    /// Completed rotations
    rotations: AtomicU64,
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            records_emitted: AtomicU64::new(0),
            records_suppressed: AtomicU64::new(0),
            console_writes: AtomicU64::new(0),
            file_write_attempts: AtomicU64::new(0),
            file_writes: AtomicU64::new(0),
            file_failures: AtomicU64::new(0),
            rotations: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn records_emitted(&self) -> u64 {
        self.records_emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn records_suppressed(&self) -> u64 {
        self.records_suppressed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn console_writes(&self) -> u64 {
        self.console_writes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn file_write_attempts(&self) -> u64 {
        self.file_write_attempts.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn file_writes(&self) -> u64 {
        self.file_writes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn file_failures(&self) -> u64 {
        self.file_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn rotations(&self) -> u64 {
        self.rotations.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_emitted(&self) -> u64 {
        self.records_emitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_suppressed(&self) -> u64 {
        self.records_suppressed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_console_write(&self) -> u64 {
        self.console_writes.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_file_attempt(&self) -> u64 {
        self.file_write_attempts.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_file_write(&self) -> u64 {
        self.file_writes.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_file_failure(&self) -> u64 {
        self.file_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_rotation(&self) -> u64 {
        self.rotations.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of calls that were filtered out, as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if no calls have been seen.
    pub fn suppression_rate(&self) -> f64 {
        let suppressed = self.records_suppressed() as f64;
        let total = suppressed + self.records_emitted() as f64;
        if total == 0.0 {
            0.0
        } else {
            (suppressed / total) * 100.0
        }
    }
}

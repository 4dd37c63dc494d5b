//! Time source and timestamp patterns
//!
//! The logger never reads the system clock directly. It asks a [`Clock`] for
//! the current local time and renders it with one of the fixed patterns
//! below, which keeps output deterministic under test.

use chrono::{DateTime, Local};
use std::fmt;

/// Pattern of the timestamp column: `2025-01-08 10:30:45`
pub const LINE_TIMESTAMP_PATTERN: &str = "%Y-%m-%d %H:%M:%S";

/// Pattern stamped into non-append log file names: `20250108_103045`
pub const FILE_STAMP_PATTERN: &str = "%Y%m%d_%H%M%S";

/// Width of a rendered [`LINE_TIMESTAMP_PATTERN`] value
pub const TIMESTAMP_WIDTH: usize = 19;

/// Supplies the current wall-clock time.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<Local>;

    /// Current time rendered with a strftime pattern
    fn format_now(&self, pattern: &str) -> String {
        self.now().format(pattern).to_string()
    }
}

/// The local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock frozen at one instant.
///
/// # Examples
///
/// ```
/// use leveled_logger::{Clock, FixedClock, LINE_TIMESTAMP_PATTERN};
/// use chrono::{Local, TimeZone};
///
/// let at = Local.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).single().unwrap();
/// let clock = FixedClock::new(at);
/// assert_eq!(clock.format_now(LINE_TIMESTAMP_PATTERN), "2025-01-08 10:30:45");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    at: DateTime<Local>,
}

impl FixedClock {
    pub fn new(at: DateTime<Local>) -> Self {
        Self { at }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.at
    }
}

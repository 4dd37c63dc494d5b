//! Appender implementations

pub mod console;
pub mod rotating_file;

pub use console::{CaptureBuffer, ConsoleAppender};
pub use rotating_file::{FileState, RotatingFileAppender, WriteOutcome};

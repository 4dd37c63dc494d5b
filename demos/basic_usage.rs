//! Basic logger usage example
//!
//! Demonstrates console logging at every level and changing the threshold
//! from its raw integer value.
//!
//! Run with: cargo run --example basic_usage

use leveled_logger::prelude::*;
use leveled_logger::{debug, error, info, warning};

fn main() {
    println!("=== Leveled Logger - Basic Usage Example ===\n");

    let logger = Logger::builder("Demo").file_enabled(false).build();

    println!("1. Logging with an explicit caller name:");
    logger.log_from("testLogging", LogLevel::Debug, "This is a debug message.");
    logger.log_from("testLogging", LogLevel::Info, "This is an info message.");
    logger.log_from("testLogging", LogLevel::Warning, "This is a warning message.");
    logger.log_from("testLogging", LogLevel::Error, "This is an error message.");

    println!("\n2. Logging with the caller resolved automatically:");
    logger.debug("This is an auto-debug message.");
    logger.info("This is an auto-info message.");
    logger.warning("This is an auto-warning message.");
    logger.error("This is an auto-error message.");

    println!("\n3. Logging through the macros:");
    debug!(logger, "Counter value: {}", 10);
    info!(logger, "Processing {} items", 100);
    warning!(logger, "Memory usage at {}%", 85);
    error!(logger, "Failed to connect to {}", "database");

    println!("\n4. Changing the log level:");
    logger.set_log_level(-1);
    logger.log_from("testLogging", LogLevel::Debug, "This debug message should not appear.");
    logger.set_log_level(0);
    logger.log_from("testLogging", LogLevel::Debug, "This debug message should appear.");
    logger.set_log_level(1);
    logger.log_from("testLogging", LogLevel::Debug, "This debug message should not appear.");
    logger.log_from("testLogging", LogLevel::Info, "This info message should appear.");
    logger.set_log_level(2);
    logger.log_from("testLogging", LogLevel::Info, "This info message should not appear.");
    logger.log_from("testLogging", LogLevel::Warning, "This warning message should appear.");
    logger.set_log_level(3);
    logger.log_from("testLogging", LogLevel::Warning, "This warning message should not appear.");
    logger.log_from("testLogging", LogLevel::Error, "This error message should appear.");

    println!("\n5. An invalid level switches logging off:");
    logger.set_log_level(7);
    logger.log_from("testLogging", LogLevel::Error, "This error message should not appear.");
    println!("   Current level: {}", logger.log_level_string());

    println!("\n=== Example completed successfully! ===");
}

//! File logging example
//!
//! Demonstrates logging to the console and a size-rotated log file, and
//! switching between the shared `log.txt` and per-session files.
//!
//! Run with: cargo run --example file_logging

use leveled_logger::info;
use leveled_logger::prelude::*;
use std::fs;

fn main() -> Result<()> {
    println!("=== Leveled Logger - File Logging Example ===\n");

    let log_dir = std::env::temp_dir().join("leveled_logger_demo");
    let logger = Logger::builder("FileDemo")
        .log_dir(&log_dir)
        .max_file_size(512)
        .build();

    println!("1. Logging to console and {}:", log_dir.display());
    for i in 0..12 {
        info!(logger, "Processing batch {}", i);
    }
    println!(
        "   Rotated {} time(s), now writing part {}",
        logger.metrics().rotations(),
        logger.part_index()
    );

    println!("\n2. Switching to a per-session file:");
    logger.set_append_to_file(false);
    logger.info("Written to a timestamped session file");
    if let Some(path) = logger.current_log_path() {
        println!("   Session file: {}", path.display());
    }

    println!("\n3. Back to the shared log file:");
    logger.set_append_to_file(true);
    logger.warning("Appended to log.txt");
    logger.close();

    println!("\n4. Files written:");
    let mut names: Vec<String> = fs::read_dir(&log_dir)
        .map_err(|e| LoggerError::io_operation("read_dir", "cannot list log directory", e))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    for name in names {
        println!("   {}", name);
    }

    println!("\n=== Example completed successfully! ===");
    Ok(())
}

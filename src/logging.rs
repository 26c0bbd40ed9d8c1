//! # Logging
//!
//! `env_logger` setup for the `stego` binary, with `chrono` timestamps.

use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

/// Initialize the logging system with timestamp, level, and message formatting.
///
/// Format: `[HH:MM:SS] [LEVEL] message`, or with `file_location`
/// `[HH:MM:SS] [LEVEL] [file:line] message`.
pub fn init_logger(level: LevelFilter, file_location: bool) {
    Builder::new()
        .format(move |buf, record| {
            let time = chrono::Local::now().format("%H:%M:%S");
            if file_location {
                writeln!(
                    buf,
                    "[{}] [{}] [{}:{}] {}",
                    time,
                    record.level(),
                    record.file().unwrap_or("unknown"),
                    record.line().unwrap_or(0),
                    record.args()
                )
            } else {
                writeln!(buf, "[{}] [{}] {}", time, record.level(), record.args())
            }
        })
        .filter_level(level)
        .init();
}

//! Logging infrastructure for audiosprite.
//!
//! This module provides:
//! - A per-run logger that forwards to `tracing` and optionally a log file
//! - Compact mode that keeps transcoder chatter out of the log
//! - Tail buffer of transcoder output for error diagnosis
//! - Global `tracing` subscriber setup for front ends
//!
//! # Example
//!
//! ```no_run
//! use sprite_core::logging::{LogConfig, RunLogger};
//!
//! let logger = RunLogger::new("sfx", Some("/path/to/logs".as_ref()), LogConfig::default()).unwrap();
//!
//! logger.phase("Assemble");
//! logger.command("ffmpeg -i beep.mp3 -ar 44100 -ac 1 -f s16le pipe:1");
//! logger.success("Sprite written");
//! ```

mod run_logger;
mod types;

pub use run_logger::RunLogger;
pub use types::{LogConfig, LogLevel, MessagePrefix};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// - Respects the RUST_LOG environment variable
/// - Falls back to the provided default level
/// - Outputs to stderr
///
/// Should be called once at application startup.
pub fn init_tracing(default_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_to_filter_str(default_level)));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Convert LogLevel to filter string.
fn level_to_filter_str(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
    }
}

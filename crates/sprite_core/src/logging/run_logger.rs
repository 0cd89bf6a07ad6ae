//! Per-run logger.
//!
//! Each sprite build gets its own logger that:
//! - Forwards every message to `tracing`
//! - Mirrors messages to a dedicated log file (if a log folder is set)
//! - Keeps transcoder output in a bounded tail buffer for error diagnosis

use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use parking_lot::Mutex;

use super::types::{LogConfig, LogLevel, MessagePrefix};

/// Logger for a single sprite build.
pub struct RunLogger {
    /// Run name for identification.
    run_name: String,
    /// Path to log file, when file logging is enabled.
    log_path: Option<PathBuf>,
    /// File writer (buffered).
    file_writer: Mutex<Option<BufWriter<File>>>,
    /// Logging configuration.
    config: LogConfig,
    /// Recent transcoder output lines.
    tail_buffer: Mutex<VecDeque<String>>,
}

impl RunLogger {
    /// Create a new run logger.
    ///
    /// # Arguments
    /// * `run_name` - Name of the run (used in the log filename)
    /// * `log_dir` - Directory for the log file, `None` for tracing only
    /// * `config` - Logging configuration
    pub fn new(
        run_name: impl Into<String>,
        log_dir: Option<&Path>,
        config: LogConfig,
    ) -> std::io::Result<Self> {
        let run_name = run_name.into();

        let (log_path, writer) = match log_dir {
            Some(dir) => {
                fs::create_dir_all(dir)?;
                let path = dir.join(format!("{}.log", sanitize_filename(&run_name)));
                let file = File::create(&path)?;
                (Some(path), Some(BufWriter::new(file)))
            }
            None => (None, None),
        };

        Ok(Self {
            run_name,
            log_path,
            file_writer: Mutex::new(writer),
            tail_buffer: Mutex::new(VecDeque::with_capacity(config.error_tail)),
            config,
        })
    }

    /// Logger that only forwards to `tracing`.
    pub fn tracing_only(run_name: impl Into<String>, config: LogConfig) -> Self {
        Self {
            run_name: run_name.into(),
            log_path: None,
            file_writer: Mutex::new(None),
            tail_buffer: Mutex::new(VecDeque::with_capacity(config.error_tail)),
            config,
        }
    }

    /// Get the run name.
    pub fn run_name(&self) -> &str {
        &self.run_name
    }

    /// Get the log file path, if file logging is enabled.
    pub fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    /// Log a message at the specified level.
    pub fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Trace => tracing::trace!(run = %self.run_name, "{}", message),
            LogLevel::Debug => tracing::debug!(run = %self.run_name, "{}", message),
            LogLevel::Info => tracing::info!(run = %self.run_name, "{}", message),
            LogLevel::Warn => tracing::warn!(run = %self.run_name, "{}", message),
            LogLevel::Error => tracing::error!(run = %self.run_name, "{}", message),
        }

        if level >= self.config.level {
            self.write_file(message);
        }
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, &MessagePrefix::Warning.format(message));
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, &MessagePrefix::Error.format(message));
    }

    /// Log a command being executed.
    pub fn command(&self, command: &str) {
        self.log(LogLevel::Debug, &MessagePrefix::Command.format(command));
    }

    /// Log a phase marker.
    pub fn phase(&self, phase_name: &str) {
        self.log(LogLevel::Info, &MessagePrefix::Phase.format(phase_name));
    }

    pub fn success(&self, message: &str) {
        self.log(LogLevel::Info, &MessagePrefix::Success.format(message));
    }

    /// Record one line of transcoder output.
    ///
    /// Always kept in the tail buffer; only logged (at debug) outside compact mode.
    pub fn output_line(&self, line: &str) {
        {
            let mut buffer = self.tail_buffer.lock();
            if self.config.error_tail > 0 && buffer.len() >= self.config.error_tail {
                buffer.pop_front();
            }
            if self.config.error_tail > 0 {
                buffer.push_back(line.to_string());
            }
        }

        if !self.config.compact {
            self.log(LogLevel::Debug, &format!("[tool] {}", line));
        }
    }

    /// Record every line of a transcoder's output.
    pub fn output_lines<'a>(&self, lines: impl IntoIterator<Item = &'a str>) {
        for line in lines {
            self.output_line(line);
        }
    }

    /// Dump the tail buffer at error level (typically after a tool failure).
    pub fn show_tail(&self, header: &str) {
        let lines = self.get_tail();
        if lines.is_empty() {
            return;
        }

        self.log(LogLevel::Error, &format!("[{}/tail]", header));
        for line in &lines {
            self.log(LogLevel::Error, line);
        }
    }

    pub fn clear_tail(&self) {
        self.tail_buffer.lock().clear();
    }

    pub fn get_tail(&self) -> Vec<String> {
        self.tail_buffer.lock().iter().cloned().collect()
    }

    /// Flush the log file.
    pub fn flush(&self) {
        if let Some(ref mut writer) = *self.file_writer.lock() {
            let _ = writer.flush();
        }
    }

    /// Close the log file.
    pub fn close(&self) {
        self.flush();
        *self.file_writer.lock() = None;
    }

    fn write_file(&self, message: &str) {
        if let Some(ref mut writer) = *self.file_writer.lock() {
            if self.config.show_timestamps {
                let timestamp = Local::now().format("%H:%M:%S");
                let _ = writeln!(writer, "[{}] {}", timestamp, message);
            } else {
                let _ = writeln!(writer, "{}", message);
            }
        }
    }
}

impl Drop for RunLogger {
    fn drop(&mut self) {
        self.close();
    }
}

/// Sanitize a string to be safe for use as a filename.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}

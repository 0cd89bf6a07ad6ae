//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level updates.

use serde::{Deserialize, Serialize};

use crate::logging::{LogConfig, LogLevel};
use crate::models::{PcmFormat, DEFAULT_CHANNELS, DEFAULT_SAMPLE_RATE};

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Path-related settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Timeline PCM format.
    #[serde(default)]
    pub audio: AudioSettings,

    /// Export formats and encoder options.
    #[serde(default)]
    pub export: ExportSettings,

    /// External tool locations.
    #[serde(default)]
    pub tools: ToolSettings,
}

/// Scratch and log locations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathSettings {
    /// Root folder for per-run work directories (empty = system temp dir).
    #[serde(default)]
    pub temp_root: String,

    /// Folder for run log files (empty = no log file).
    #[serde(default)]
    pub logs_folder: String,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Minimum level to report.
    #[serde(default)]
    pub level: LogLevel,

    /// Keep transcoder output out of the log unless a command fails.
    #[serde(default = "default_true")]
    pub compact: bool,

    /// Number of transcoder output lines kept for failure reports.
    #[serde(default = "default_error_tail")]
    pub error_tail: u32,
}

fn default_true() -> bool {
    true
}

fn default_error_tail() -> u32 {
    20
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            compact: true,
            error_tail: default_error_tail(),
        }
    }
}

impl LoggingSettings {
    /// Per-run logger configuration for these settings.
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            level: self.level,
            compact: self.compact,
            error_tail: self.error_tail as usize,
            ..LogConfig::default()
        }
    }
}

/// Timeline PCM format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Channel count (1 = mono, 2 = stereo).
    #[serde(default = "default_channels")]
    pub channels: u16,
}

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

fn default_channels() -> u16 {
    DEFAULT_CHANNELS
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            channels: default_channels(),
        }
    }
}

impl AudioSettings {
    pub fn pcm(&self) -> PcmFormat {
        PcmFormat::new(self.sample_rate, self.channels)
    }
}

/// Export configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Comma separated format allow-list (empty = all formats).
    #[serde(default)]
    pub formats: String,

    /// Comma separated formats for per-clip raw parts (empty = none).
    #[serde(default)]
    pub raw_parts: String,

    /// Bitrate passed to the mp3 encoder.
    #[serde(default = "default_mp3_bitrate")]
    pub mp3_bitrate: String,
}

fn default_mp3_bitrate() -> String {
    "128k".to_string()
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            formats: String::new(),
            raw_parts: String::new(),
            mp3_bitrate: default_mp3_bitrate(),
        }
    }
}

/// External tool overrides. Unset tools are searched on `PATH`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ffmpeg_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub afconvert_path: Option<String>,
}

/// Config sections for targeted updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    Paths,
    Logging,
    Audio,
    Export,
    Tools,
}

impl ConfigSection {
    /// All sections, in file order.
    pub const ALL: [ConfigSection; 5] = [
        ConfigSection::Paths,
        ConfigSection::Logging,
        ConfigSection::Audio,
        ConfigSection::Export,
        ConfigSection::Tools,
    ];

    /// TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "paths",
            ConfigSection::Logging => "logging",
            ConfigSection::Audio => "audio",
            ConfigSection::Export => "export",
            ConfigSection::Tools => "tools",
        }
    }

    /// Comment written above the section.
    pub fn comment(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "# Work and log directories",
            ConfigSection::Logging => "# Logging configuration",
            ConfigSection::Audio => "# Timeline PCM format",
            ConfigSection::Export => "# Export formats and encoder options",
            ConfigSection::Tools => "# External tool paths (searched on PATH when unset)",
        }
    }
}

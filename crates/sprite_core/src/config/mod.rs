//! Configuration management for audiosprite.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Section-level updates (only changed section is modified)
//!
//! Every setting has a default, so running without a config file is the
//! normal case; command-line flags override whatever is loaded here.
//!
//! # Example
//!
//! ```no_run
//! use sprite_core::config::{ConfigManager, ConfigSection};
//!
//! let mut config = ConfigManager::new(".config/audiosprite.toml");
//! config.load_or_create().unwrap();
//!
//! println!("Sample rate: {}", config.settings().audio.sample_rate);
//!
//! config.settings_mut().audio.channels = 2;
//! config.update_section(ConfigSection::Audio).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    AudioSettings, ConfigSection, ExportSettings, LoggingSettings, PathSettings, Settings,
    ToolSettings,
};

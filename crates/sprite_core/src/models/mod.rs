//! Data models for audiosprite.
//!
//! This module contains the core data structures used throughout the crate:
//! - PCM format description and byte/duration conversions
//! - Decoded clips and sprite entries
//! - Run specifications and export jobs

mod clip;
mod jobs;
mod pcm;
mod sprite;

pub use clip::Clip;
pub use jobs::{parse_format_list, ExportJob, RunSpec, SILENCE_TRACK};
pub use pcm::{PcmFormat, BYTES_PER_SAMPLE, DEFAULT_CHANNELS, DEFAULT_SAMPLE_RATE};
pub use sprite::{SpriteEntry, SpriteMap};

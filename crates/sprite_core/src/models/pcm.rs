//! Raw PCM format shared by every buffer in a run.

use serde::{Deserialize, Serialize};

/// Default timeline sample rate.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Default timeline channel count (mono).
pub const DEFAULT_CHANNELS: u16 = 1;

/// Samples are always signed 16-bit little-endian.
pub const BYTES_PER_SAMPLE: u64 = 2;

/// Sample rate and channel layout of the raw `s16le` timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PcmFormat {
    pub sample_rate: u32,
    pub channels: u16,
}

impl PcmFormat {
    pub fn new(sample_rate: u32, channels: u16) -> Self {
        Self {
            sample_rate,
            channels,
        }
    }

    /// ffmpeg sample format name.
    pub fn codec_name(&self) -> &'static str {
        "s16le"
    }

    /// Bytes in one sample frame (all channels).
    pub fn frame_size(&self) -> u64 {
        self.channels as u64 * BYTES_PER_SAMPLE
    }

    /// Bytes in one second of audio.
    pub fn bytes_per_second(&self) -> u64 {
        self.sample_rate as u64 * self.frame_size()
    }

    /// Duration in seconds of `bytes` bytes of audio.
    pub fn duration_secs(&self, bytes: u64) -> f64 {
        bytes as f64 / self.bytes_per_second() as f64
    }

    /// Byte length of `secs` seconds of audio, rounded to whole frames.
    ///
    /// Saturates at `u64::MAX` instead of overflowing.
    pub fn bytes_for_secs(&self, secs: f64) -> u64 {
        if secs <= 0.0 {
            return 0;
        }
        let frames = (secs * self.sample_rate as f64).round() as u64;
        frames.saturating_mul(self.frame_size())
    }

    /// Reject formats ffmpeg cannot produce.
    pub fn is_valid(&self) -> bool {
        self.sample_rate > 0 && self.channels > 0
    }
}

impl Default for PcmFormat {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE, DEFAULT_CHANNELS)
    }
}

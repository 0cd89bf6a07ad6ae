//! Decoded source clips.

use std::path::{Path, PathBuf};

use super::pcm::PcmFormat;

/// A source file that has been decoded to raw PCM in the work directory.
#[derive(Debug, Clone)]
pub struct Clip {
    /// Sprite name (source filename without its extension).
    pub name: String,
    /// 1-based position in the input list.
    pub sequence: usize,
    /// Original source file.
    pub source_path: PathBuf,
    /// Temporary raw PCM file.
    pub raw_path: PathBuf,
    /// Size of the raw PCM in bytes.
    pub byte_len: u64,
}

impl Clip {
    /// Derive the sprite name for a source path.
    ///
    /// `sounds/beep.mp3` -> `beep`, `archive.tar.gz` -> `archive.tar`.
    pub fn name_for(source: &Path) -> String {
        source
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| source.to_string_lossy().to_string())
    }

    /// Clip duration in seconds.
    pub fn duration_secs(&self, pcm: PcmFormat) -> f64 {
        pcm.duration_secs(self.byte_len)
    }
}

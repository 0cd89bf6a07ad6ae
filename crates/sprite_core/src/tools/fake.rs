//! In-process stand-in for ffmpeg used by tests.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use parking_lot::Mutex;

use crate::models::{Clip, PcmFormat};

use super::types::{MediaTools, ToolError, ToolOutput, ToolResult};

/// Fake transcoder.
///
/// Decoding writes `durations[name]` seconds of non-zero PCM (1s when the
/// clip is not listed). Encoding copies the raw input to the destination so
/// output sizes track input sizes.
#[derive(Default)]
pub(crate) struct FakeTools {
    durations: HashMap<String, f64>,
    fail_decode: Option<String>,
    fail_encode: Option<String>,
    secondary: bool,
    fail_caf: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeTools {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_clip(mut self, name: &str, secs: f64) -> Self {
        self.durations.insert(name.to_string(), secs);
        self
    }

    /// Make decoding of the named clip exit with code 1.
    pub(crate) fn failing_decode(mut self, name: &str) -> Self {
        self.fail_decode = Some(name.to_string());
        self
    }

    /// Make encoding to the given extension exit with code 1.
    pub(crate) fn failing_encode(mut self, ext: &str) -> Self {
        self.fail_encode = Some(ext.to_string());
        self
    }

    pub(crate) fn with_secondary_encoder(mut self) -> Self {
        self.secondary = true;
        self
    }

    /// Make the aiff to caf conversion exit with code 1.
    pub(crate) fn failing_caf(mut self) -> Self {
        self.fail_caf = true;
        self
    }

    /// Recorded invocations, e.g. `decode beep`, `encode out.mp3`, `caf out.caf`.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn failure(tool: &str) -> ToolError {
        ToolError::Failed {
            tool: tool.to_string(),
            exit_code: Some(1),
            signal: None,
            stderr: "simulated failure".to_string(),
        }
    }

    fn io(tool: &str, e: std::io::Error) -> ToolError {
        ToolError::Io {
            tool: tool.to_string(),
            source: e,
        }
    }
}

impl MediaTools for FakeTools {
    fn decode_to_pcm(&self, source: &Path, pcm: PcmFormat, dest: &Path) -> ToolResult<ToolOutput> {
        let name = Clip::name_for(source);
        self.calls.lock().push(format!("decode {}", name));

        if self.fail_decode.as_deref() == Some(name.as_str()) {
            return Err(Self::failure("ffmpeg"));
        }

        let secs = self.durations.get(&name).copied().unwrap_or(1.0);
        let bytes = pcm.bytes_for_secs(secs) as usize;
        fs::write(dest, vec![0x11u8; bytes]).map_err(|e| Self::io("ffmpeg", e))?;
        Ok(ToolOutput::new(format!("fake decode {}", source.display()), b""))
    }

    fn encode_pcm(
        &self,
        raw: &Path,
        _pcm: PcmFormat,
        _args: &[String],
        dest: &Path,
    ) -> ToolResult<ToolOutput> {
        self.calls.lock().push(format!("encode {}", dest.display()));

        let ext = dest
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_default();
        if self.fail_encode.as_deref() == Some(ext.as_str()) {
            return Err(Self::failure("ffmpeg"));
        }

        fs::copy(raw, dest).map_err(|e| Self::io("ffmpeg", e))?;
        Ok(ToolOutput::new(format!("fake encode {}", dest.display()), b""))
    }

    fn derive_caf(&self, aiff: &Path, dest: &Path) -> ToolResult<ToolOutput> {
        self.calls.lock().push(format!("caf {}", dest.display()));
        if self.fail_caf {
            return Err(Self::failure("afconvert"));
        }
        fs::copy(aiff, dest).map_err(|e| Self::io("afconvert", e))?;
        Ok(ToolOutput::new(format!("fake afconvert {}", dest.display()), b""))
    }

    fn has_secondary_encoder(&self) -> bool {
        self.secondary
    }
}

//! Types shared by the external tool layer.

use std::io;
use std::path::Path;
use std::process::ExitStatus;

use thiserror::Error;

use crate::models::PcmFormat;

/// Error from resolving or running an external tool.
#[derive(Error, Debug)]
pub enum ToolError {
    /// The executable could not be resolved.
    #[error("{tool} was not found (configured path or PATH)")]
    NotFound { tool: String },

    /// The process could not be started.
    #[error("Failed to spawn {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    /// The process ran and exited unsuccessfully.
    #[error("{tool} failed (exit code {}, signal {})", fmt_opt(.exit_code), fmt_opt(.signal))]
    Failed {
        tool: String,
        exit_code: Option<i32>,
        signal: Option<i32>,
        stderr: String,
    },

    /// Preparing the process I/O failed.
    #[error("I/O error preparing {tool}: {source}")]
    Io {
        tool: String,
        #[source]
        source: io::Error,
    },
}

fn fmt_opt(value: &Option<i32>) -> String {
    value.map_or_else(|| "none".to_string(), |v| v.to_string())
}

impl ToolError {
    /// Build a `Failed` error from a finished process.
    pub fn failed(tool: impl Into<String>, status: ExitStatus, stderr: &[u8]) -> Self {
        Self::Failed {
            tool: tool.into(),
            exit_code: status.code(),
            signal: exit_signal(status),
            stderr: String::from_utf8_lossy(stderr).to_string(),
        }
    }

    /// Exit code and terminating signal, when the process actually ran.
    pub fn exit_info(&self) -> (Option<i32>, Option<i32>) {
        match self {
            ToolError::Failed {
                exit_code, signal, ..
            } => (*exit_code, *signal),
            _ => (None, None),
        }
    }

    /// Captured stderr of a failed process.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            ToolError::Failed { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}

/// Signal that terminated the process, if any.
#[cfg(unix)]
pub(crate) fn exit_signal(status: ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
pub(crate) fn exit_signal(_status: ExitStatus) -> Option<i32> {
    None
}

/// Result type for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

/// What a successful tool run leaves behind for the log.
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    /// Command line as it was run.
    pub command: String,
    /// Diagnostic output (stderr), one entry per line.
    pub stderr_lines: Vec<String>,
}

impl ToolOutput {
    pub fn new(command: impl Into<String>, stderr: &[u8]) -> Self {
        Self {
            command: command.into(),
            stderr_lines: String::from_utf8_lossy(stderr)
                .lines()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// The transcoder seam used by the pipeline.
///
/// All raw PCM handled here is `s16le` in the given [`PcmFormat`].
pub trait MediaTools: Send + Sync {
    /// Decode any input to raw PCM, streaming straight into `dest`.
    fn decode_to_pcm(&self, source: &Path, pcm: PcmFormat, dest: &Path) -> ToolResult<ToolOutput>;

    /// Encode raw PCM at `raw` into `dest`, `args` selecting the codec/container.
    fn encode_pcm(
        &self,
        raw: &Path,
        pcm: PcmFormat,
        args: &[String],
        dest: &Path,
    ) -> ToolResult<ToolOutput>;

    /// Convert an aiff file into the compressed CAF variant.
    fn derive_caf(&self, aiff: &Path, dest: &Path) -> ToolResult<ToolOutput>;

    /// Whether [`MediaTools::derive_caf`] is available on this host.
    fn has_secondary_encoder(&self) -> bool;
}

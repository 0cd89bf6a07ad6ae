//! ffmpeg (and afconvert) subprocess implementation of [`MediaTools`].

use std::ffi::OsStr;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::config::ToolSettings;
use crate::models::PcmFormat;

use super::locate::{locate_tool, AFCONVERT, FFMPEG};
use super::types::{MediaTools, ToolError, ToolOutput, ToolResult};

/// Media tools backed by the `ffmpeg` binary.
///
/// `afconvert` is only resolved on macOS; everywhere else the secondary
/// encoder is reported as unavailable.
#[derive(Debug, Clone)]
pub struct FfmpegTools {
    ffmpeg: PathBuf,
    afconvert: Option<PathBuf>,
}

impl FfmpegTools {
    /// Use explicit executable paths.
    pub fn new(ffmpeg: impl Into<PathBuf>, afconvert: Option<PathBuf>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            afconvert,
        }
    }

    /// Resolve the tools from settings and `PATH`.
    ///
    /// Fails with [`ToolError::NotFound`] when ffmpeg cannot be found; a
    /// missing afconvert only disables the CAF export.
    pub fn resolve(settings: &ToolSettings) -> ToolResult<Self> {
        let ffmpeg = locate_tool(settings.ffmpeg_path.as_deref(), FFMPEG).ok_or_else(|| {
            ToolError::NotFound {
                tool: FFMPEG.to_string(),
            }
        })?;

        let afconvert = if cfg!(target_os = "macos") {
            locate_tool(settings.afconvert_path.as_deref(), AFCONVERT)
        } else {
            None
        };

        tracing::debug!(
            "Resolved ffmpeg at {} (afconvert: {})",
            ffmpeg.display(),
            afconvert
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "unavailable".to_string())
        );

        Ok(Self { ffmpeg, afconvert })
    }

    /// Build the decode argument list.
    fn decode_args(source: &Path, pcm: PcmFormat) -> Vec<String> {
        vec![
            "-hide_banner".to_string(),
            "-i".to_string(),
            source.display().to_string(),
            "-ar".to_string(),
            pcm.sample_rate.to_string(),
            "-ac".to_string(),
            pcm.channels.to_string(),
            "-f".to_string(),
            pcm.codec_name().to_string(),
            "pipe:1".to_string(),
        ]
    }

    /// Build the encode argument list.
    fn encode_args(raw: &Path, pcm: PcmFormat, args: &[String], dest: &Path) -> Vec<String> {
        let mut tokens = vec![
            "-hide_banner".to_string(),
            "-y".to_string(),
            "-ar".to_string(),
            pcm.sample_rate.to_string(),
            "-ac".to_string(),
            pcm.channels.to_string(),
            "-f".to_string(),
            pcm.codec_name().to_string(),
            "-i".to_string(),
            raw.display().to_string(),
        ];
        tokens.extend(args.iter().cloned());
        tokens.push(dest.display().to_string());
        tokens
    }
}

impl MediaTools for FfmpegTools {
    fn decode_to_pcm(&self, source: &Path, pcm: PcmFormat, dest: &Path) -> ToolResult<ToolOutput> {
        let source = source
            .canonicalize()
            .unwrap_or_else(|_| source.to_path_buf());

        let sink = File::create(dest).map_err(|e| ToolError::Io {
            tool: FFMPEG.to_string(),
            source: e,
        })?;

        let mut cmd = Command::new(&self.ffmpeg);
        cmd.args(Self::decode_args(&source, pcm))
            .stdout(Stdio::from(sink));

        run(FFMPEG, cmd)
    }

    fn encode_pcm(
        &self,
        raw: &Path,
        pcm: PcmFormat,
        args: &[String],
        dest: &Path,
    ) -> ToolResult<ToolOutput> {
        let mut cmd = Command::new(&self.ffmpeg);
        cmd.args(Self::encode_args(raw, pcm, args, dest))
            .stdout(Stdio::null());

        run(FFMPEG, cmd)
    }

    fn derive_caf(&self, aiff: &Path, dest: &Path) -> ToolResult<ToolOutput> {
        let afconvert = self.afconvert.as_ref().ok_or_else(|| ToolError::NotFound {
            tool: AFCONVERT.to_string(),
        })?;

        let mut cmd = Command::new(afconvert);
        cmd.args(["-f", "caff", "-d", "ima4"])
            .arg(aiff)
            .arg(dest)
            .stdout(Stdio::null());

        run(AFCONVERT, cmd)
    }

    fn has_secondary_encoder(&self) -> bool {
        self.afconvert.is_some()
    }
}

/// Run a prepared command to completion, capturing stderr.
fn run(tool: &str, mut cmd: Command) -> ToolResult<ToolOutput> {
    let command = describe(&cmd);
    tracing::debug!("Running: {}", command);

    let output = cmd
        .stdin(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| ToolError::Spawn {
            tool: tool.to_string(),
            source: e,
        })?;

    if !output.status.success() {
        return Err(ToolError::failed(tool, output.status, &output.stderr));
    }

    Ok(ToolOutput::new(command, &output.stderr))
}

/// Render a command line for logging.
fn describe(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(OsStr::to_string_lossy)
        .collect::<Vec<_>>()
        .join(" ")
}

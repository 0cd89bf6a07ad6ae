//! Source decoding.
//!
//! Converts an arbitrary source file into raw `s16le` PCM at the timeline's
//! sample rate and channel count, so every clip can be appended byte-for-byte.

use std::fs;
use std::path::Path;

use crate::logging::RunLogger;
use crate::models::{Clip, PcmFormat};
use crate::orchestrator::{StepError, StepResult};
use crate::tools::MediaTools;

/// Decode one source into a temporary raw file inside `work_dir`.
///
/// The raw file is named after the clip's 1-based `sequence` so that two
/// sources with the same basename never collide.
///
/// # Errors
/// - [`StepError::SourceNotFound`] if `source` does not exist (checked before
///   the transcoder is started)
/// - [`StepError::DecodeFailed`] if the transcoder fails
pub fn decode_clip(
    tools: &dyn MediaTools,
    source: &Path,
    sequence: usize,
    pcm: PcmFormat,
    work_dir: &Path,
    logger: &RunLogger,
) -> StepResult<Clip> {
    if !source.exists() {
        return Err(StepError::source_not_found(source));
    }

    let raw_path = work_dir.join(format!("clip_{:03}.raw", sequence));
    logger.debug(&format!(
        "Decoding {} -> {}",
        source.display(),
        raw_path.display()
    ));

    match tools.decode_to_pcm(source, pcm, &raw_path) {
        Ok(output) => {
            logger.command(&output.command);
            logger.output_lines(output.stderr_lines.iter().map(String::as_str));
        }
        Err(e) => {
            if let Some(stderr) = e.stderr() {
                logger.output_lines(stderr.lines());
            }
            logger.show_tail("ffmpeg");
            if let Err(remove_err) = fs::remove_file(&raw_path) {
                logger.debug(&format!(
                    "Could not remove {}: {}",
                    raw_path.display(),
                    remove_err
                ));
            }
            return Err(StepError::decode_failed(source, e));
        }
    }

    let byte_len = fs::metadata(&raw_path)
        .map_err(|e| StepError::io_error("reading decoded clip size", e))?
        .len();

    Ok(Clip {
        name: Clip::name_for(source),
        sequence,
        source_path: source.to_path_buf(),
        raw_path,
        byte_len,
    })
}

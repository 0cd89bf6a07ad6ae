//! Runs export jobs against the transcoder.

use std::fs;
use std::path::{Path, PathBuf};

use crate::logging::RunLogger;
use crate::models::{ExportJob, PcmFormat};
use crate::orchestrator::{StepError, StepResult};
use crate::tools::{MediaTools, ToolError, ToolOutput};

use super::registry::{AIFF, CAF};

/// Encodes raw PCM into the requested formats.
///
/// Whether the secondary (CAF) encoder exists is asked once, when the
/// exporter is created, and reused for every job.
pub struct Exporter<'a> {
    tools: &'a dyn MediaTools,
    pcm: PcmFormat,
    secondary: bool,
}

impl<'a> Exporter<'a> {
    pub fn new(tools: &'a dyn MediaTools, pcm: PcmFormat) -> Self {
        Self {
            tools,
            pcm,
            secondary: tools.has_secondary_encoder(),
        }
    }

    pub fn has_secondary_encoder(&self) -> bool {
        self.secondary
    }

    /// Export `raw` for one job and return the artifact path.
    ///
    /// For aiff jobs on hosts with the secondary encoder the aiff is
    /// converted to CAF, deleted, and the CAF path is returned instead.
    ///
    /// # Errors
    /// - [`StepError::ExportFailed`] if either encoder fails
    /// - [`StepError::IoError`] if the output directory cannot be created
    pub fn export(&self, raw: &Path, job: &ExportJob, logger: &RunLogger) -> StepResult<PathBuf> {
        let dest = job.output_path();
        ensure_parent(&dest)?;

        logger.info(&format!("Exporting {}", dest.display()));
        let output = self
            .tools
            .encode_pcm(raw, self.pcm, &job.args, &dest)
            .map_err(|e| self.failed(&job.format, e, logger))?;
        record(logger, &output);

        if job.format != AIFF || !self.secondary {
            return Ok(dest);
        }

        let caf = job.path_with_extension(CAF);
        logger.info(&format!("Converting {} -> {}", dest.display(), caf.display()));
        let output = self
            .tools
            .derive_caf(&dest, &caf)
            .map_err(|e| self.failed(CAF, e, logger))?;
        record(logger, &output);

        fs::remove_file(&dest).map_err(|e| StepError::io_error("removing intermediate aiff", e))?;
        Ok(caf)
    }

    fn failed(&self, format: &str, error: ToolError, logger: &RunLogger) -> StepError {
        if let Some(stderr) = error.stderr() {
            logger.output_lines(stderr.lines());
        }
        logger.show_tail(&format!("{} export", format));
        StepError::export_failed(format, error)
    }
}

fn record(logger: &RunLogger, output: &ToolOutput) {
    logger.command(&output.command);
    logger.output_lines(output.stderr_lines.iter().map(String::as_str));
}

fn ensure_parent(path: &Path) -> StepResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .map_err(|e| StepError::io_error("creating output directory", e)),
        _ => Ok(()),
    }
}

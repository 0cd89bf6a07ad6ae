//! Export step - transcodes the finished timeline into every selected format.

use std::path::Path;

use crate::models::ExportJob;
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, RunState, StepOutcome};

/// Exports `<output>.<format>` for each format in the allow-list.
pub struct ExportStep;

impl ExportStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ExportStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for ExportStep {
    fn name(&self) -> &str {
        "Export"
    }

    fn description(&self) -> &str {
        "Export sprite formats"
    }

    fn validate_input(&self, _ctx: &Context) -> StepResult<()> {
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut RunState) -> StepResult<StepOutcome> {
        let registry = ctx.registry();
        let formats = registry.select(&ctx.spec.formats);
        if formats.is_empty() {
            return Ok(StepOutcome::Skipped(
                "no known formats in the export list".to_string(),
            ));
        }

        state
            .timeline
            .flush()
            .map_err(|e| StepError::io_error("flushing timeline", e))?;
        let raw = state.timeline.path().to_path_buf();
        let exporter = ctx.exporter();

        for format in formats {
            let job = ExportJob::sprite(&ctx.spec.output, format.id.as_str(), format.args.clone());
            let artifact = exporter.export(&raw, &job, &ctx.logger)?;
            if job.register {
                state.urls.push(artifact.to_string_lossy().to_string());
            }
        }

        ctx.logger
            .info(&format!("Exported {} file(s)", state.urls.len()));
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context, state: &RunState) -> StepResult<()> {
        if let Some(missing) = state.urls.iter().find(|url| !Path::new(url).exists()) {
            return Err(StepError::invalid_output(format!(
                "Exported file missing: {}",
                missing
            )));
        }
        Ok(())
    }
}

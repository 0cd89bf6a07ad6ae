//! Assemble step - decodes every source and appends it to the timeline.

use std::fs;

use crate::decoder::decode_clip;
use crate::export::ExportFormat;
use crate::models::ExportJob;
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{AssembledClip, Context, RunState, StepOutcome};

/// Decodes sources in input order, appending each clip (plus padding) to the
/// timeline and exporting its raw parts before the next clip starts.
pub struct AssembleStep;

impl AssembleStep {
    pub fn new() -> Self {
        Self
    }

    /// Raw part formats known to the registry; unknown ids are skipped.
    fn raw_part_formats(ctx: &Context) -> Vec<ExportFormat> {
        let registry = ctx.registry();
        let mut formats: Vec<ExportFormat> = Vec::new();
        for id in &ctx.spec.raw_parts {
            match registry.lookup(id) {
                Some(format) if !formats.iter().any(|f| f.id == format.id) => {
                    formats.push(format.clone())
                }
                Some(_) => {}
                None => ctx
                    .logger
                    .debug(&format!("Ignoring unknown raw part format '{}'", id)),
            }
        }
        formats
    }
}

impl Default for AssembleStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for AssembleStep {
    fn name(&self) -> &str {
        "Assemble"
    }

    fn description(&self) -> &str {
        "Decode and assemble clips"
    }

    fn validate_input(&self, ctx: &Context) -> StepResult<()> {
        if ctx.spec.inputs.is_empty() {
            return Err(StepError::MissingInput);
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut RunState) -> StepResult<StepOutcome> {
        let pcm = ctx.pcm();
        let raw_formats = Self::raw_part_formats(ctx);
        let exporter = ctx.exporter();

        for (index, source) in ctx.spec.inputs.iter().enumerate() {
            let sequence = index + 1;
            let clip = decode_clip(
                ctx.tools.as_ref(),
                source,
                sequence,
                pcm,
                &ctx.work_dir,
                &ctx.logger,
            )?;

            let appended = state
                .timeline
                .append_clip(&clip.raw_path)
                .map_err(|e| StepError::io_error("appending clip to timeline", e))?;

            if state.sprite.insert(clip.name.as_str(), appended.entry).is_some() {
                ctx.logger.warn(&format!(
                    "Duplicate sprite name '{}' from {}; replacing the earlier entry",
                    clip.name,
                    source.display()
                ));
            }
            ctx.logger.info(&format!(
                "Added {} at {} ms ({} ms, {:.3}s padding)",
                clip.name,
                appended.entry.offset_ms,
                appended.entry.duration_ms,
                appended.padding_secs
            ));

            for format in &raw_formats {
                let job = ExportJob::raw_part(
                    &ctx.spec.output,
                    sequence,
                    format.id.as_str(),
                    format.args.clone(),
                );
                let artifact = exporter.export(&clip.raw_path, &job, &ctx.logger)?;
                state.raw_parts.push(artifact);
            }

            if let Err(e) = fs::remove_file(&clip.raw_path) {
                ctx.logger.debug(&format!(
                    "Could not remove {}: {}",
                    clip.raw_path.display(),
                    e
                ));
            }

            state.clips.push(AssembledClip {
                name: clip.name,
                sequence,
                source: clip.source_path,
                entry: appended.entry,
                padding_secs: appended.padding_secs,
            });
        }

        state
            .timeline
            .flush()
            .map_err(|e| StepError::io_error("flushing timeline", e))?;

        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, ctx: &Context, state: &RunState) -> StepResult<()> {
        if state.clips.len() != ctx.spec.inputs.len() {
            return Err(StepError::invalid_output(format!(
                "Assembled {} of {} clips",
                state.clips.len(),
                ctx.spec.inputs.len()
            )));
        }
        Ok(())
    }
}

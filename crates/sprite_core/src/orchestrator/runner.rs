//! Runs one sprite build end to end.
//!
//! The runner owns everything around the pipeline: input and tool preflight,
//! the per-run work directory, the run logger and the timeline file.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use crate::config::Settings;
use crate::logging::RunLogger;
use crate::models::{RunSpec, SpriteMap};
use crate::timeline::Timeline;
use crate::tools::{FfmpegTools, MediaTools, ToolError};

use super::create_standard_pipeline;
use super::errors::{PipelineError, PipelineResult, StepError};
use super::types::{AssembledClip, Context, RunState};

/// Step name used for failures before the pipeline starts.
pub const PREFLIGHT: &str = "Preflight";

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_name: String,
    /// RFC 3339 start time of the run.
    pub started_at: String,
    pub manifest_path: PathBuf,
    pub urls: Vec<String>,
    pub sprite: SpriteMap,
    pub clips: Vec<AssembledClip>,
    pub raw_parts: Vec<PathBuf>,
    pub steps_completed: Vec<String>,
    pub steps_skipped: Vec<String>,
    pub log_path: Option<PathBuf>,
}

/// Builds sprites with a fixed set of settings.
///
/// # Example
///
/// ```ignore
/// let runner = SpriteRunner::new(settings);
/// let spec = RunSpec::new(inputs, "build/sfx").with_formats("ogg,mp3");
/// let report = runner.run(spec)?;
/// println!("{}", report.manifest_path.display());
/// ```
pub struct SpriteRunner {
    settings: Settings,
}

impl SpriteRunner {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Resolve ffmpeg from settings/`PATH` and run the build.
    ///
    /// Nothing is written when there are no inputs or the transcoder is
    /// missing.
    pub fn run(&self, spec: RunSpec) -> PipelineResult<RunReport> {
        check_inputs(&spec)?;

        let tools = FfmpegTools::resolve(&self.settings.tools).map_err(|e| match e {
            ToolError::NotFound { tool } => PipelineError::step_failed(
                spec.run_name(),
                PREFLIGHT,
                StepError::TranscoderUnavailable { tool },
            ),
            other => PipelineError::setup_failed(spec.run_name(), other.to_string()),
        })?;

        self.run_with_tools(spec, Arc::new(tools))
    }

    /// Run the build with an already resolved transcoder.
    pub fn run_with_tools(
        &self,
        spec: RunSpec,
        tools: Arc<dyn MediaTools>,
    ) -> PipelineResult<RunReport> {
        check_inputs(&spec)?;
        let run_name = spec.run_name();

        if !spec.pcm.is_valid() {
            return Err(PipelineError::setup_failed(
                &run_name,
                format!(
                    "invalid PCM format: {} Hz, {} channel(s)",
                    spec.pcm.sample_rate, spec.pcm.channels
                ),
            ));
        }

        let work_dir = create_work_dir(&self.settings.paths.temp_root).map_err(|e| {
            PipelineError::setup_failed(&run_name, format!("Failed to create work directory: {}", e))
        })?;
        let logger = Arc::new(self.create_logger(&run_name)?);

        let timeline = Timeline::create(work_dir.path().join("timeline.raw"), spec.pcm)
            .map_err(|e| {
                PipelineError::setup_failed(&run_name, format!("Failed to create timeline: {}", e))
            })?;

        logger.info(&format!(
            "Starting sprite build: {} file(s) -> {}",
            spec.inputs.len(),
            spec.output
        ));
        logger.debug(&format!("Work directory: {}", work_dir.path().display()));

        let ctx = Context::new(
            spec,
            self.settings.clone(),
            &run_name,
            work_dir.path().to_path_buf(),
            Arc::clone(&logger),
            tools,
        );
        let mut state = RunState::new(timeline);
        logger.debug(&format!("Run started at {}", state.started_at));

        let outcome = create_standard_pipeline().run(&ctx, &mut state);

        let RunState {
            started_at,
            timeline,
            sprite,
            urls,
            clips,
            raw_parts,
            manifest_path,
        } = state;
        drop(timeline);

        let work_path = work_dir.path().to_path_buf();
        if let Err(e) = work_dir.close() {
            logger.warn(&format!(
                "Could not remove work directory {}: {}",
                work_path.display(),
                e
            ));
        }
        logger.close();

        let run = outcome?;
        Ok(RunReport {
            run_name,
            started_at,
            manifest_path: manifest_path.unwrap_or_else(|| ctx.spec.manifest_path()),
            urls,
            sprite,
            clips,
            raw_parts,
            steps_completed: run.steps_completed,
            steps_skipped: run.steps_skipped,
            log_path: logger.log_path().map(Path::to_path_buf),
        })
    }

    fn create_logger(&self, run_name: &str) -> PipelineResult<RunLogger> {
        let config = self.settings.logging.log_config();
        let folder = self.settings.paths.logs_folder.trim();
        if folder.is_empty() {
            return Ok(RunLogger::tracing_only(run_name, config));
        }

        RunLogger::new(run_name, Some(Path::new(folder)), config).map_err(|e| {
            PipelineError::setup_failed(run_name, format!("Failed to create logger: {}", e))
        })
    }
}

fn check_inputs(spec: &RunSpec) -> PipelineResult<()> {
    if spec.inputs.is_empty() {
        return Err(PipelineError::step_failed(
            spec.run_name(),
            PREFLIGHT,
            StepError::MissingInput,
        ));
    }
    Ok(())
}

/// Per-run scratch directory, removed when dropped.
fn create_work_dir(temp_root: &str) -> std::io::Result<TempDir> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("audiosprite-");

    let root = temp_root.trim();
    if root.is_empty() {
        return builder.tempdir();
    }
    fs::create_dir_all(root)?;
    builder.tempdir_in(root)
}

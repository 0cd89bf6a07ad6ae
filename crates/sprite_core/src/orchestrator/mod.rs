//! Pipeline orchestrator for a sprite build.
//!
//! A run is a fixed sequence of steps sharing a read-only [`Context`] and a
//! mutable [`RunState`] that owns the timeline and its cursor.
//!
//! # Architecture
//!
//! ```text
//! SpriteRunner
//!     ├── Preflight: inputs present, ffmpeg resolvable
//!     └── Pipeline
//!         ├── Step: Silence   (optional looping silence track)
//!         ├── Step: Assemble  (decode → append + pad → raw parts, per clip)
//!         ├── Step: Export    (timeline → every selected format)
//!         └── Step: Manifest  (<output>.json)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use sprite_core::orchestrator::SpriteRunner;
//!
//! let runner = SpriteRunner::new(settings);
//! let report = runner.run(RunSpec::new(inputs, "output"))?;
//! println!("{} urls", report.urls.len());
//! ```

mod errors;
mod pipeline;
mod runner;
mod step;
pub mod steps;
#[cfg(test)]
mod testing;
mod types;

pub use errors::{PipelineError, PipelineResult, StepError, StepResult};
pub use pipeline::{Pipeline, PipelineRunResult};
pub use runner::{RunReport, SpriteRunner, PREFLIGHT};
pub use step::PipelineStep;
pub use steps::{AssembleStep, ExportStep, ManifestStep, SilenceStep};
pub use types::{AssembledClip, Context, RunState, StepOutcome};

/// Create the standard pipeline with all steps in the correct order.
///
/// 1. Silence - write the looping silence track (when requested)
/// 2. Assemble - decode, append and pad each clip; export raw parts
/// 3. Export - transcode the timeline into every selected format
/// 4. Manifest - write `<output>.json`
pub fn create_standard_pipeline() -> Pipeline {
    Pipeline::new()
        .with_step(SilenceStep::new())
        .with_step(AssembleStep::new())
        .with_step(ExportStep::new())
        .with_step(ManifestStep::new())
}

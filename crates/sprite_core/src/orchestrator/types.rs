//! Core types for the orchestrator pipeline.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Settings;
use crate::export::{Exporter, FormatRegistry};
use crate::logging::RunLogger;
use crate::models::{PcmFormat, RunSpec, SpriteEntry, SpriteMap};
use crate::timeline::Timeline;
use crate::tools::MediaTools;

/// Read-only context passed to pipeline steps.
///
/// Contains run configuration and shared resources that steps can read
/// but not modify. Mutable state goes in `RunState`.
pub struct Context {
    /// What to build.
    pub spec: RunSpec,
    /// Application settings.
    pub settings: Settings,
    /// Run name (used in logs and error context).
    pub run_name: String,
    /// Per-run scratch directory.
    pub work_dir: PathBuf,
    /// Per-run logger.
    pub logger: Arc<RunLogger>,
    /// Transcoder.
    pub tools: Arc<dyn MediaTools>,
}

impl Context {
    pub fn new(
        spec: RunSpec,
        settings: Settings,
        run_name: impl Into<String>,
        work_dir: PathBuf,
        logger: Arc<RunLogger>,
        tools: Arc<dyn MediaTools>,
    ) -> Self {
        Self {
            spec,
            settings,
            run_name: run_name.into(),
            work_dir,
            logger,
            tools,
        }
    }

    pub fn pcm(&self) -> PcmFormat {
        self.spec.pcm
    }

    /// Export formats with this run's encoder settings.
    pub fn registry(&self) -> FormatRegistry {
        FormatRegistry::default_for(self.spec.pcm, &self.settings.export.mp3_bitrate)
    }

    pub fn exporter(&self) -> Exporter<'_> {
        Exporter::new(self.tools.as_ref(), self.spec.pcm)
    }
}

/// Mutable run state that accumulates results from pipeline steps.
///
/// The timeline and its cursor live here and are only ever written by one
/// step at a time.
pub struct RunState {
    /// When the run started.
    pub started_at: String,
    /// The growing raw sprite buffer.
    pub timeline: Timeline,
    /// Sprite entries in insertion order.
    pub sprite: SpriteMap,
    /// Registered export artifacts, in export order.
    pub urls: Vec<String>,
    /// Clips appended by the Assemble step.
    pub clips: Vec<AssembledClip>,
    /// Raw part files written (never registered in `urls`).
    pub raw_parts: Vec<PathBuf>,
    /// Manifest written by the Manifest step.
    pub manifest_path: Option<PathBuf>,
}

impl RunState {
    pub fn new(timeline: Timeline) -> Self {
        Self {
            started_at: chrono::Local::now().to_rfc3339(),
            timeline,
            sprite: SpriteMap::new(),
            urls: Vec::new(),
            clips: Vec::new(),
            raw_parts: Vec::new(),
            manifest_path: None,
        }
    }
}

/// One clip as placed on the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledClip {
    pub name: String,
    pub sequence: usize,
    pub source: PathBuf,
    pub entry: SpriteEntry,
    /// Silence written after the clip.
    pub padding_secs: f64,
}

/// Result of executing a pipeline step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Step completed successfully.
    Success,
    /// Step was skipped (nothing to do, not an error).
    Skipped(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn run_state_starts_empty() {
        let dir = tempdir().unwrap();
        let timeline = Timeline::create(dir.path().join("t.raw"), PcmFormat::default()).unwrap();
        let state = RunState::new(timeline);

        assert!(state.sprite.is_empty());
        assert!(state.urls.is_empty());
        assert!(state.manifest_path.is_none());
        assert!(!state.started_at.is_empty());
        assert_eq!(state.timeline.cursor_bytes(), 0);
    }
}

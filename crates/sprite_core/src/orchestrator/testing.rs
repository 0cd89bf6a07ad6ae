//! Shared fixtures for orchestrator tests.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use crate::config::Settings;
use crate::logging::{LogConfig, RunLogger};
use crate::models::RunSpec;
use crate::timeline::Timeline;
use crate::tools::fake::FakeTools;
use crate::tools::MediaTools;

use super::types::{Context, RunState};

/// Temp directory with placeholder sources and a fake transcoder.
pub(crate) struct Fixture {
    pub dir: TempDir,
    pub tools: Arc<FakeTools>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_tools(FakeTools::new())
    }

    pub fn with_tools(tools: FakeTools) -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
            tools: Arc::new(tools),
        }
    }

    /// Create a placeholder source file under `sounds/`.
    pub fn source(&self, file: &str) -> PathBuf {
        let path = self.dir.path().join("sounds").join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"placeholder").unwrap();
        path
    }

    pub fn output_base(&self) -> String {
        self.dir.path().join("out").to_string_lossy().to_string()
    }

    pub fn spec(&self, inputs: Vec<PathBuf>) -> RunSpec {
        RunSpec::new(inputs, self.output_base())
    }

    pub fn context(&self, inputs: Vec<PathBuf>) -> (Context, RunState) {
        self.context_for(self.spec(inputs))
    }

    pub fn context_for(&self, spec: RunSpec) -> (Context, RunState) {
        let work_dir = self.dir.path().join("work");
        fs::create_dir_all(&work_dir).unwrap();

        let timeline = Timeline::create(work_dir.join("timeline.raw"), spec.pcm).unwrap();
        let tools: Arc<dyn MediaTools> = self.tools.clone();
        let logger = Arc::new(RunLogger::tracing_only("test", LogConfig::default()));
        let ctx = Context::new(spec, Settings::default(), "test", work_dir, logger, tools);

        (ctx, RunState::new(timeline))
    }
}

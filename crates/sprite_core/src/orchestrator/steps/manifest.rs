//! Manifest step - writes `<output>.json`.

use crate::manifest::{resolve_autoplay, Autoplay, Manifest};
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, RunState, StepOutcome};

/// Serializes the sprite map and exported urls.
pub struct ManifestStep;

impl ManifestStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ManifestStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for ManifestStep {
    fn name(&self) -> &str {
        "Manifest"
    }

    fn description(&self) -> &str {
        "Write manifest"
    }

    fn validate_input(&self, _ctx: &Context) -> StepResult<()> {
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut RunState) -> StepResult<StepOutcome> {
        let autoplay = resolve_autoplay(ctx.spec.autoplay.as_deref(), ctx.spec.has_silence());
        if let Some(Autoplay::Name(name)) = &autoplay {
            if !state.sprite.contains(name) {
                ctx.logger
                    .warn(&format!("Autoplay target '{}' is not in the sprite", name));
            }
        }

        let manifest = Manifest::new(state.urls.clone(), state.sprite.clone(), autoplay);
        let path = ctx.spec.manifest_path();
        manifest
            .write(&path)
            .map_err(|e| StepError::io_error("writing manifest", e))?;

        ctx.logger
            .info(&format!("Exported json OK: {}", path.display()));
        state.manifest_path = Some(path);
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context, state: &RunState) -> StepResult<()> {
        match &state.manifest_path {
            Some(path) if path.exists() => Ok(()),
            Some(path) => Err(StepError::invalid_output(format!(
                "Manifest not found: {}",
                path.display()
            ))),
            None => Err(StepError::invalid_output("Manifest not recorded")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SpriteEntry;
    use crate::orchestrator::testing::Fixture;
    use serde_json::{json, Value};
    use std::fs;

    fn read_manifest(state: &RunState) -> Value {
        let path = state.manifest_path.as_ref().unwrap();
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn writes_urls_sprite_and_autoplay() {
        let fixture = Fixture::new();
        let spec = fixture
            .spec(Vec::new())
            .with_autoplay(Some("beep".to_string()));
        let (ctx, mut state) = fixture.context_for(spec);
        state.urls.push("out.ogg".to_string());
        state.sprite.insert("beep", SpriteEntry::new(0, 1751));

        let step = ManifestStep::new();
        step.execute(&ctx, &mut state).unwrap();
        step.validate_output(&ctx, &state).unwrap();

        assert_eq!(
            read_manifest(&state),
            json!({"urls": ["out.ogg"], "sprite": {"beep": [0, 1751]}, "autoplay": "beep"})
        );
    }

    #[test]
    fn silence_defaults_autoplay_to_true() {
        let fixture = Fixture::new();
        let spec = fixture.spec(Vec::new()).with_silence(3.0);
        let (ctx, mut state) = fixture.context_for(spec);

        ManifestStep::new().execute(&ctx, &mut state).unwrap();

        assert_eq!(read_manifest(&state)["autoplay"], json!(true));
    }

    #[test]
    fn autoplay_omitted_by_default() {
        let fixture = Fixture::new();
        let (ctx, mut state) = fixture.context(Vec::new());

        ManifestStep::new().execute(&ctx, &mut state).unwrap();

        assert!(read_manifest(&state).get("autoplay").is_none());
    }
}

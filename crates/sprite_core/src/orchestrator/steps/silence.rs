//! Silence step - writes the looping silence track at the head of the timeline.

use crate::models::SILENCE_TRACK;
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, RunState, StepOutcome};

/// Registers the synthetic `silence` sprite when a silence duration is set.
pub struct SilenceStep;

impl SilenceStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SilenceStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for SilenceStep {
    fn name(&self) -> &str {
        "Silence"
    }

    fn description(&self) -> &str {
        "Write silence track"
    }

    fn validate_input(&self, _ctx: &Context) -> StepResult<()> {
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut RunState) -> StepResult<StepOutcome> {
        if !ctx.spec.has_silence() {
            return Ok(StepOutcome::Skipped("no silence track requested".to_string()));
        }

        let entry = state
            .timeline
            .append_silence_track(ctx.spec.silence_secs)
            .map_err(|e| StepError::io_error("writing silence track", e))?;
        state.sprite.insert(SILENCE_TRACK, entry);

        ctx.logger.info(&format!(
            "Silence track: {} ms at {} ms",
            entry.duration_ms, entry.offset_ms
        ));
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context, state: &RunState) -> StepResult<()> {
        if !state.sprite.contains(SILENCE_TRACK) {
            return Err(StepError::invalid_output("Silence track not registered"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SpriteEntry;
    use crate::orchestrator::testing::Fixture;

    #[test]
    fn skipped_without_silence() {
        let fixture = Fixture::new();
        let (ctx, mut state) = fixture.context(Vec::new());

        let outcome = SilenceStep::new().execute(&ctx, &mut state).unwrap();

        assert!(matches!(outcome, StepOutcome::Skipped(_)));
        assert_eq!(state.timeline.cursor_bytes(), 0);
    }

    #[test]
    fn registers_looping_entry_and_advances_cursor() {
        let fixture = Fixture::new();
        let spec = fixture.spec(Vec::new()).with_silence(2.5);
        let (ctx, mut state) = fixture.context_for(spec);

        let step = SilenceStep::new();
        assert_eq!(step.execute(&ctx, &mut state).unwrap(), StepOutcome::Success);
        step.validate_output(&ctx, &state).unwrap();

        assert_eq!(
            state.sprite.get(SILENCE_TRACK),
            Some(&SpriteEntry::new(0, 2500).looping())
        );
        assert!((state.timeline.cursor_secs() - 3.5).abs() < 1e-9);
    }
}

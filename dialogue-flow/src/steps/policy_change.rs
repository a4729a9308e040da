use async_trait::async_trait;

use crate::{
    error::Result,
    session::SessionState,
    step::{Step, StepHandler, Turn},
};

use super::FINAL_CHOICE_PROMPT;

/// Policy changes need only a free-text description before handoff.
pub struct GeneralDescriptionStep;

#[async_trait]
impl StepHandler for GeneralDescriptionStep {
    fn step(&self) -> Step {
        Step::GeneralDescription
    }

    async fn handle(&self, utterance: &str, state: &mut SessionState) -> Result<Turn> {
        state.set_issue_description(utterance);
        Ok(Turn::new(FINAL_CHOICE_PROMPT, Step::FinalChoice))
    }
}

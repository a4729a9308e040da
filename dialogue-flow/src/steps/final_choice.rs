use async_trait::async_trait;
use tracing::info;

use crate::{
    error::Result,
    session::{Sentiment, SessionState},
    step::{Step, StepHandler, Turn},
};

/// Escalation / self-service fork every branch converges on. Both outcomes
/// render the agent handoff summary and end the conversation.
pub struct FinalChoiceStep;

#[async_trait]
impl StepHandler for FinalChoiceStep {
    fn step(&self) -> Step {
        Step::FinalChoice
    }

    async fn handle(&self, utterance: &str, state: &mut SessionState) -> Result<Turn> {
        if utterance.trim() == "2" {
            // An urgent roadside situation must not be masked by the
            // generic escalation sentiment.
            state.escalate(Sentiment::NeedsAgent);
            info!(session_id = %state.session_id, "transferring to agent");

            let summary = state.render_handoff_summary();
            Ok(Turn::new(
                format!("🔄 Transferring to agent...\n\n{}", summary),
                Step::Complete,
            ))
        } else {
            state.push_step_tried("Attempted self-service completion");
            info!(session_id = %state.session_id, "proceeding with self-service");

            let summary = state.render_handoff_summary();
            Ok(Turn::new(
                format!("✓ Proceeding with self-service...\n\n{}", summary),
                Step::Complete,
            ))
        }
    }
}

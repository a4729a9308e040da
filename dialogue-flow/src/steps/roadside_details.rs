use async_trait::async_trait;
use tracing::info;

use crate::{
    error::Result,
    session::{Sentiment, SessionState},
    step::{Step, StepHandler, Turn},
};

use super::FINAL_CHOICE_PROMPT;

/// Roadside branch: situation, location, vehicle issue, safety check. A
/// caller in an unsafe location escalates the session to urgent.
pub struct RoadsideDescriptionStep;

#[async_trait]
impl StepHandler for RoadsideDescriptionStep {
    fn step(&self) -> Step {
        Step::RoadsideDescription
    }

    async fn handle(&self, utterance: &str, state: &mut SessionState) -> Result<Turn> {
        state.set_issue_description(utterance);
        Ok(Turn::new("What's your current location?", Step::RoadsideLocation))
    }
}

pub struct RoadsideLocationStep;

#[async_trait]
impl StepHandler for RoadsideLocationStep {
    fn step(&self) -> Step {
        Step::RoadsideLocation
    }

    async fn handle(&self, utterance: &str, state: &mut SessionState) -> Result<Turn> {
        state.set_incident_detail("location", utterance);
        Ok(Turn::new(
            "What's wrong with your vehicle? (e.g., flat tire, won't start)",
            Step::RoadsideIssue,
        ))
    }
}

pub struct RoadsideIssueStep;

#[async_trait]
impl StepHandler for RoadsideIssueStep {
    fn step(&self) -> Step {
        Step::RoadsideIssue
    }

    async fn handle(&self, utterance: &str, state: &mut SessionState) -> Result<Turn> {
        state.set_incident_detail("vehicle_issue", utterance);
        Ok(Turn::new(
            "Are you in a safe location? (yes/no)",
            Step::RoadsideSafety,
        ))
    }
}

pub struct RoadsideSafetyStep;

#[async_trait]
impl StepHandler for RoadsideSafetyStep {
    fn step(&self) -> Step {
        Step::RoadsideSafety
    }

    async fn handle(&self, utterance: &str, state: &mut SessionState) -> Result<Turn> {
        let answer = utterance.trim().to_lowercase();
        state.set_incident_detail("safe", answer.clone());
        if answer == "no" {
            state.escalate(Sentiment::Urgent);
            info!(session_id = %state.session_id, "caller not in a safe location, session marked urgent");
        }
        Ok(Turn::new(FINAL_CHOICE_PROMPT, Step::FinalChoice))
    }
}

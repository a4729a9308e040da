use async_trait::async_trait;

use crate::{
    error::Result,
    session::SessionState,
    step::{Step, StepHandler, Turn},
};

use super::FINAL_CHOICE_PROMPT;

/// Claim branch: what happened, when, where, damage, photos. Each step
/// accepts arbitrary free text and chains to the next question.
pub struct ClaimDescriptionStep;

#[async_trait]
impl StepHandler for ClaimDescriptionStep {
    fn step(&self) -> Step {
        Step::ClaimDescription
    }

    async fn handle(&self, utterance: &str, state: &mut SessionState) -> Result<Turn> {
        state.set_issue_description(utterance);
        Ok(Turn::new(
            "When did this happen? (e.g., 'yesterday', 'this morning')",
            Step::ClaimWhen,
        ))
    }
}

pub struct ClaimWhenStep;

#[async_trait]
impl StepHandler for ClaimWhenStep {
    fn step(&self) -> Step {
        Step::ClaimWhen
    }

    async fn handle(&self, utterance: &str, state: &mut SessionState) -> Result<Turn> {
        state.set_incident_detail("when", utterance);
        Ok(Turn::new("Where did this occur? (city/location)", Step::ClaimWhere))
    }
}

pub struct ClaimWhereStep;

#[async_trait]
impl StepHandler for ClaimWhereStep {
    fn step(&self) -> Step {
        Step::ClaimWhere
    }

    async fn handle(&self, utterance: &str, state: &mut SessionState) -> Result<Turn> {
        state.set_incident_detail("where", utterance);
        Ok(Turn::new(
            "What damage occurred? (brief description)",
            Step::ClaimDamage,
        ))
    }
}

pub struct ClaimDamageStep;

#[async_trait]
impl StepHandler for ClaimDamageStep {
    fn step(&self) -> Step {
        Step::ClaimDamage
    }

    async fn handle(&self, utterance: &str, state: &mut SessionState) -> Result<Turn> {
        state.set_incident_detail("damage", utterance);
        Ok(Turn::new(
            "Do you have photos of the damage? (yes/no)",
            Step::ClaimPhotos,
        ))
    }
}

pub struct ClaimPhotosStep;

#[async_trait]
impl StepHandler for ClaimPhotosStep {
    fn step(&self) -> Step {
        Step::ClaimPhotos
    }

    async fn handle(&self, utterance: &str, state: &mut SessionState) -> Result<Turn> {
        let answer = utterance.trim().to_lowercase();
        state.set_incident_detail("photos_available", answer.clone());
        if answer == "yes" {
            state.push_step_tried("Took photos of damage");
        }
        Ok(Turn::new(FINAL_CHOICE_PROMPT, Step::FinalChoice))
    }
}

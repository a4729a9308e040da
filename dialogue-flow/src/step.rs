use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{error::Result, session::SessionState};

/// Fixed response for any input arriving after the flow has ended.
pub const SESSION_COMPLETE_MESSAGE: &str =
    "This session is complete. Start a new conversation to begin again.";

/// Current position of the dialogue state machine for a session.
///
/// Every conversation starts at `Verification` and converges on
/// `FinalChoice` so escalation and summary rendering exist in one place;
/// `Complete` is terminal and idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Verification,
    IntentSelection,
    ClaimDescription,
    ClaimWhen,
    ClaimWhere,
    ClaimDamage,
    ClaimPhotos,
    BillingType,
    BillingReason,
    RoadsideDescription,
    RoadsideLocation,
    RoadsideIssue,
    RoadsideSafety,
    GeneralDescription,
    FinalChoice,
    Complete,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Verification => "verification",
            Step::IntentSelection => "intent_selection",
            Step::ClaimDescription => "claim_description",
            Step::ClaimWhen => "claim_when",
            Step::ClaimWhere => "claim_where",
            Step::ClaimDamage => "claim_damage",
            Step::ClaimPhotos => "claim_photos",
            Step::BillingType => "billing_type",
            Step::BillingReason => "billing_reason",
            Step::RoadsideDescription => "roadside_description",
            Step::RoadsideLocation => "roadside_location",
            Step::RoadsideIssue => "roadside_issue",
            Step::RoadsideSafety => "roadside_safety",
            Step::GeneralDescription => "general_description",
            Step::FinalChoice => "final_choice",
            Step::Complete => "complete",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Step::Complete)
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of consuming one caller utterance: the assistant prompt to render
/// and the step the session moves to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub prompt: String,
    pub next_step: Step,
}

impl Turn {
    pub fn new(prompt: impl Into<String>, next_step: Step) -> Self {
        Self {
            prompt: prompt.into(),
            next_step,
        }
    }

    /// The fixed turn produced once the flow has ended.
    pub fn terminal() -> Self {
        Self::new(SESSION_COMPLETE_MESSAGE, Step::Complete)
    }
}

/// One state of the dialogue machine.
///
/// A handler owns its own input validation and transition rule: it consumes
/// exactly one utterance, mutates the session state, and names the next
/// step. Re-prompting without advancing is expressed by returning the
/// handler's own step as `next_step`.
#[async_trait]
pub trait StepHandler: Send + Sync {
    /// Step this handler is registered under.
    fn step(&self) -> Step;

    async fn handle(&self, utterance: &str, state: &mut SessionState) -> Result<Turn>;
}

use async_trait::async_trait;
use tracing::info;

use crate::{
    error::Result,
    session::{Role, SessionState},
    step::{Step, StepHandler, Turn},
};

/// Any policy number of at least this many characters passes verification.
const MIN_POLICY_NUMBER_LEN: usize = 6;

pub(crate) const INTENT_MENU: &str = "Please select an option:\n\
    1. File a claim\n\
    2. Billing and payments\n\
    3. Roadside assistance\n\
    4. Policy changes";

/// First step of every conversation: checks the caller's policy number.
///
/// Verification failure is non-fatal; the session continues unverified and
/// the machine advances to intent selection either way.
pub struct VerificationStep;

#[async_trait]
impl StepHandler for VerificationStep {
    fn step(&self) -> Step {
        Step::Verification
    }

    async fn handle(&self, utterance: &str, state: &mut SessionState) -> Result<Turn> {
        let policy_number = utterance.trim();

        if policy_number.chars().count() >= MIN_POLICY_NUMBER_LEN {
            state.set_caller_identity(policy_number);
            state.mark_verified();
            state.record_message(Role::System, "Caller verified successfully");
            info!(session_id = %state.session_id, "caller verified");

            Ok(Turn::new(
                format!("✓ Verified. Thank you!\n\n{}", INTENT_MENU),
                Step::IntentSelection,
            ))
        } else {
            state.record_message(Role::System, "Verification failed");
            info!(session_id = %state.session_id, "verification failed, continuing unverified");

            Ok(Turn::new(
                format!(
                    "✗ Invalid policy number. Continuing without verification.\n\n{}",
                    INTENT_MENU
                ),
                Step::IntentSelection,
            ))
        }
    }
}

use async_trait::async_trait;

use crate::{
    error::Result,
    session::SessionState,
    step::{Step, StepHandler, Turn},
};

use super::FINAL_CHOICE_PROMPT;

pub(crate) const BILLING_MENU: &str = "What billing issue can I help with?\n\
    1. Make a payment\n\
    2. Payment arrangement/extension\n\
    3. Question about my bill";

const INVALID_BILLING_PROMPT: &str = "Please enter 1, 2, or 3.";

/// Billing sub-menu. A payment arrangement needs a stated reason before the
/// final choice; the other selections go there directly.
pub struct BillingTypeStep;

#[async_trait]
impl StepHandler for BillingTypeStep {
    fn step(&self) -> Step {
        Step::BillingType
    }

    async fn handle(&self, utterance: &str, state: &mut SessionState) -> Result<Turn> {
        let billing_type = match utterance.trim() {
            "1" => "make_payment",
            "2" => "payment_arrangement",
            "3" => "billing_question",
            _ => {
                // Unrecognized selection: re-prompt without advancing.
                return Ok(Turn::new(INVALID_BILLING_PROMPT, Step::BillingType));
            }
        };

        state.set_incident_detail("billing_type", billing_type);

        if billing_type == "payment_arrangement" {
            Ok(Turn::new(
                "Can you briefly explain why you need an arrangement?",
                Step::BillingReason,
            ))
        } else {
            Ok(Turn::new(FINAL_CHOICE_PROMPT, Step::FinalChoice))
        }
    }
}

pub struct BillingReasonStep;

#[async_trait]
impl StepHandler for BillingReasonStep {
    fn step(&self) -> Step {
        Step::BillingReason
    }

    async fn handle(&self, utterance: &str, state: &mut SessionState) -> Result<Turn> {
        state.set_incident_detail("arrangement_reason", utterance);
        Ok(Turn::new(FINAL_CHOICE_PROMPT, Step::FinalChoice))
    }
}

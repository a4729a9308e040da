// IVR dialogue step handlers
pub mod verification;
pub mod intent_selection;
pub mod claim_details;
pub mod billing_details;
pub mod roadside_details;
pub mod policy_change;
pub mod final_choice;

pub use verification::VerificationStep;
pub use intent_selection::IntentSelectionStep;
pub use claim_details::{
    ClaimDamageStep, ClaimDescriptionStep, ClaimPhotosStep, ClaimWhenStep, ClaimWhereStep,
};
pub use billing_details::{BillingReasonStep, BillingTypeStep};
pub use roadside_details::{
    RoadsideDescriptionStep, RoadsideIssueStep, RoadsideLocationStep, RoadsideSafetyStep,
};
pub use policy_change::GeneralDescriptionStep;
pub use final_choice::FinalChoiceStep;

/// Every branch converges on this menu so the escalation / self-service
/// decision is written once.
pub(crate) const FINAL_CHOICE_PROMPT: &str = "Based on the information you've provided:\n\
    1. Continue and complete this on your own\n\
    2. Transfer to a specialist agent\n\
    \n\
    Your choice (1 or 2):";

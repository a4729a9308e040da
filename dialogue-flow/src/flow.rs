use std::sync::Arc;

use crate::{
    engine::{DialogueEngine, DialogueEngineBuilder},
    kb::DocumentMatcher,
    steps::{
        BillingReasonStep, BillingTypeStep, ClaimDamageStep, ClaimDescriptionStep,
        ClaimPhotosStep, ClaimWhenStep, ClaimWhereStep, FinalChoiceStep, GeneralDescriptionStep,
        IntentSelectionStep, RoadsideDescriptionStep, RoadsideIssueStep, RoadsideLocationStep,
        RoadsideSafetyStep, VerificationStep,
    },
};

/// Assembles the full insurance IVR flow.
///
/// Every presentation surface drives this one machine; `preview_lines`
/// bounds the article preview shown at intent selection and is the only
/// knob that differs between surfaces.
pub fn insurance_ivr_flow(matcher: DocumentMatcher, preview_lines: usize) -> DialogueEngine {
    DialogueEngineBuilder::new("insurance_ivr")
        .register(Arc::new(VerificationStep))
        .register(Arc::new(IntentSelectionStep::new(matcher, preview_lines)))
        .register(Arc::new(ClaimDescriptionStep))
        .register(Arc::new(ClaimWhenStep))
        .register(Arc::new(ClaimWhereStep))
        .register(Arc::new(ClaimDamageStep))
        .register(Arc::new(ClaimPhotosStep))
        .register(Arc::new(BillingTypeStep))
        .register(Arc::new(BillingReasonStep))
        .register(Arc::new(RoadsideDescriptionStep))
        .register(Arc::new(RoadsideLocationStep))
        .register(Arc::new(RoadsideIssueStep))
        .register(Arc::new(RoadsideSafetyStep))
        .register(Arc::new(GeneralDescriptionStep))
        .register(Arc::new(FinalChoiceStep))
        .build()
}

use async_trait::async_trait;
use tracing::info;

use crate::{
    error::Result,
    kb::DocumentMatcher,
    session::{Intent, SessionState},
    step::{Step, StepHandler, Turn},
};

use super::billing_details::BILLING_MENU;

const INVALID_SELECTION_PROMPT: &str = "Please enter 1, 2, 3, or 4 to select an option.";

/// Horizontal rule framing the article preview in the prompt text.
const PREVIEW_DIVIDER_WIDTH: usize = 40;

/// Resolves the caller's top-level goal from the fixed menu, surfaces the
/// matching knowledge-base article, and routes into the intent's detail
/// branch.
pub struct IntentSelectionStep {
    matcher: DocumentMatcher,
    preview_lines: usize,
}

impl IntentSelectionStep {
    /// `preview_lines` bounds the article preview; the terminal and HTTP
    /// surfaces size it differently, so it is a parameter rather than a
    /// constant.
    pub fn new(matcher: DocumentMatcher, preview_lines: usize) -> Self {
        Self {
            matcher,
            preview_lines,
        }
    }

    /// Preview block prepended to the branch prompt, or empty when no
    /// article is available.
    fn citation_block(&self, state: &mut SessionState, intent: Intent) -> String {
        let Some(doc_id) = self.matcher.resolve(intent) else {
            return String::new();
        };

        state.push_retrieved_doc(doc_id.clone());
        info!(session_id = %state.session_id, doc_id = %doc_id, "knowledge base article retrieved");

        match self.matcher.preview(&doc_id, self.preview_lines) {
            Some(snippet) => {
                let divider = "─".repeat(PREVIEW_DIVIDER_WIDTH);
                format!("📄 Retrieved: {}\n{}\n{}\n{}\n\n", doc_id, divider, snippet, divider)
            }
            None => String::new(),
        }
    }
}

#[async_trait]
impl StepHandler for IntentSelectionStep {
    fn step(&self) -> Step {
        Step::IntentSelection
    }

    async fn handle(&self, utterance: &str, state: &mut SessionState) -> Result<Turn> {
        let Some(intent) = Intent::from_menu_choice(utterance) else {
            // Unrecognized selection: re-prompt without advancing.
            return Ok(Turn::new(INVALID_SELECTION_PROMPT, Step::IntentSelection));
        };

        state.set_intent(intent);
        info!(session_id = %state.session_id, intent = %intent, "intent resolved");

        let citation = self.citation_block(state, intent);

        let (prompt, next_step) = match intent {
            Intent::FileClaim => (
                "I'll help you file a claim. Briefly, what happened?",
                Step::ClaimDescription,
            ),
            Intent::Billing => (BILLING_MENU, Step::BillingType),
            Intent::Roadside => (
                "I'll get you roadside help. What's your situation?",
                Step::RoadsideDescription,
            ),
            Intent::PolicyChange => (
                "What would you like to change about your policy?",
                Step::GeneralDescription,
            ),
        };

        Ok(Turn::new(format!("{}{}", citation, prompt), next_step))
    }
}

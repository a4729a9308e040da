use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

/// Caller's top-level goal, chosen from the fixed IVR menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    FileClaim,
    Billing,
    Roadside,
    PolicyChange,
}

impl Intent {
    /// Maps a menu selection ("1".."4") to an intent. Anything else is not
    /// a selection and the menu step re-prompts.
    pub fn from_menu_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(Intent::FileClaim),
            "2" => Some(Intent::Billing),
            "3" => Some(Intent::Roadside),
            "4" => Some(Intent::PolicyChange),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::FileClaim => "file_claim",
            Intent::Billing => "billing",
            Intent::Roadside => "roadside",
            Intent::PolicyChange => "policy_change",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conversation mood as far as routing cares about it.
///
/// Escalation is one-way: once a session is `Urgent`, a later generic
/// `NeedsAgent` escalation must not mask it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Neutral,
    Urgent,
    NeedsAgent,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Neutral => "neutral",
            Sentiment::Urgent => "urgent",
            Sentiment::NeedsAgent => "needs_agent",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// One transcript line with its capture time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Accumulating record of one conversation.
///
/// Created with all defaults at conversation start and mutated exclusively
/// by step handlers; it is never destroyed, only rendered into the agent
/// handoff summary once the flow reaches its terminal step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub session_id: String,
    pub caller_identity: Option<String>,
    pub verified: bool,
    pub intent: Option<Intent>,
    pub issue_description: String,
    pub steps_tried: Vec<String>,
    pub sentiment: Sentiment,
    pub conversation_history: Vec<TranscriptEntry>,
    pub retrieved_docs: Vec<String>,
    /// Insertion-ordered so the handoff summary lists keys in the order
    /// they were collected.
    pub incident_details: Vec<(String, String)>,
}

impl SessionState {
    pub fn new() -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        Self {
            session_id: format!("CALL-{}-{}", Utc::now().format("%Y%m%d"), &suffix[..8]),
            caller_identity: None,
            verified: false,
            intent: None,
            issue_description: String::new(),
            steps_tried: Vec::new(),
            sentiment: Sentiment::Neutral,
            conversation_history: Vec::new(),
            retrieved_docs: Vec::new(),
            incident_details: Vec::new(),
        }
    }

    /// Caller identity is written once by verification and never cleared.
    pub fn set_caller_identity(&mut self, identity: impl Into<String>) {
        if self.caller_identity.is_some() {
            warn!(session_id = %self.session_id, "caller identity already set, ignoring");
            return;
        }
        let identity = identity.into();
        debug!(session_id = %self.session_id, field = "caller_identity", value = %identity, "state update");
        self.caller_identity = Some(identity);
    }

    pub fn mark_verified(&mut self) {
        debug!(session_id = %self.session_id, field = "verified", value = true, "state update");
        self.verified = true;
    }

    /// Intent is set exactly once; a second assignment is ignored.
    pub fn set_intent(&mut self, intent: Intent) {
        if let Some(existing) = self.intent {
            warn!(session_id = %self.session_id, existing = %existing, "intent already set, ignoring");
            return;
        }
        debug!(session_id = %self.session_id, field = "intent", value = %intent, "state update");
        self.intent = Some(intent);
    }

    /// Issue description is collected at most once per conversation.
    pub fn set_issue_description(&mut self, description: impl Into<String>) {
        if !self.issue_description.is_empty() {
            warn!(session_id = %self.session_id, "issue description already set, ignoring");
            return;
        }
        let description = description.into();
        debug!(session_id = %self.session_id, field = "issue_description", value = %description, "state update");
        self.issue_description = description;
    }

    pub fn push_step_tried(&mut self, step: impl Into<String>) {
        let step = step.into();
        debug!(session_id = %self.session_id, field = "steps_tried", value = %step, "state update");
        self.steps_tried.push(step);
    }

    /// Escalates sentiment under the monotonicity rule: `Urgent` is never
    /// downgraded by a later `NeedsAgent` assignment.
    pub fn escalate(&mut self, sentiment: Sentiment) {
        if self.sentiment == Sentiment::Urgent && sentiment == Sentiment::NeedsAgent {
            debug!(session_id = %self.session_id, "urgent sentiment retained over needs_agent");
            return;
        }
        debug!(session_id = %self.session_id, field = "sentiment", value = %sentiment, "state update");
        self.sentiment = sentiment;
    }

    pub fn push_retrieved_doc(&mut self, doc_id: impl Into<String>) {
        let doc_id = doc_id.into();
        debug!(session_id = %self.session_id, field = "retrieved_docs", value = %doc_id, "state update");
        self.retrieved_docs.push(doc_id);
    }

    /// Upserts an intent-specific incident field. Entries are never removed
    /// and first-write order is preserved.
    pub fn set_incident_detail(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        debug!(session_id = %self.session_id, field = %key, value = %value, "incident detail update");
        if let Some(entry) = self.incident_details.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.incident_details.push((key, value));
        }
    }

    /// Appends a timestamped transcript entry. Never fails, never reorders.
    pub fn record_message(&mut self, role: Role, content: impl Into<String>) {
        self.conversation_history.push(TranscriptEntry {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        });
    }

    /// Renders the structured report handed to the next human agent.
    ///
    /// Pure function of the current state: the section layout and literal
    /// headers are a contract parsed downstream, so the text is fixed aside
    /// from the state values themselves.
    pub fn render_handoff_summary(&self) -> String {
        let mut incident_info = String::new();
        if !self.incident_details.is_empty() {
            incident_info.push_str("\nINCIDENT DETAILS:\n");
            for (key, value) in &self.incident_details {
                incident_info.push_str(&format!("  {}: {}\n", key, value));
            }
        }

        let steps = if self.steps_tried.is_empty() {
            "  None".to_string()
        } else {
            self.steps_tried
                .iter()
                .map(|step| format!("  - {}", step))
                .collect::<Vec<_>>()
                .join("\n")
        };

        let docs = if self.retrieved_docs.is_empty() {
            "  None".to_string()
        } else {
            self.retrieved_docs
                .iter()
                .map(|doc| format!("  - {}", doc))
                .collect::<Vec<_>>()
                .join("\n")
        };

        format!(
            "\n========================================\n\
             AGENT HANDOFF SUMMARY\n\
             ========================================\n\
             Session ID: {}\n\
             Caller: {}\n\
             Verified: {}\n\
             \n\
             CUSTOMER GOAL:\n\
             {}\n\
             \n\
             ISSUE DESCRIPTION:\n\
             {}\n\
             {}\n\
             STEPS ATTEMPTED:\n\
             {}\n\
             \n\
             RETRIEVED KNOWLEDGE BASE ARTICLES:\n\
             {}\n\
             \n\
             CONVERSATION TURNS: {}\n\
             SENTIMENT: {}\n\
             \n\
             RECOMMENDED NEXT ACTION:\n\
             [Agent to determine based on above context]\n\
             ========================================\n",
            self.session_id,
            self.caller_identity.as_deref().unwrap_or("Unknown"),
            if self.verified { "✓ YES" } else { "✗ NO" },
            self.intent.map(|i| i.as_str()).unwrap_or("Not determined"),
            if self.issue_description.is_empty() {
                "No details provided"
            } else {
                self.issue_description.as_str()
            },
            incident_info,
            steps,
            docs,
            self.conversation_history.len(),
            self.sentiment,
        )
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_is_unique_and_prefixed() {
        let a = SessionState::new();
        let b = SessionState::new();
        assert!(a.session_id.starts_with("CALL-"));
        assert_ne!(a.session_id, b.session_id);
    }

    #[test]
    fn caller_identity_is_write_once() {
        let mut state = SessionState::new();
        state.set_caller_identity("POLICY123456");
        state.set_caller_identity("OTHER999999");
        assert_eq!(state.caller_identity.as_deref(), Some("POLICY123456"));
    }

    #[test]
    fn intent_is_write_once() {
        let mut state = SessionState::new();
        state.set_intent(Intent::Roadside);
        state.set_intent(Intent::Billing);
        assert_eq!(state.intent, Some(Intent::Roadside));
    }

    #[test]
    fn issue_description_is_write_once() {
        let mut state = SessionState::new();
        state.set_issue_description("flat tire");
        state.set_issue_description("something else");
        assert_eq!(state.issue_description, "flat tire");
    }

    #[test]
    fn urgent_sentiment_survives_needs_agent() {
        let mut state = SessionState::new();
        state.escalate(Sentiment::Urgent);
        state.escalate(Sentiment::NeedsAgent);
        assert_eq!(state.sentiment, Sentiment::Urgent);
    }

    #[test]
    fn needs_agent_applies_when_not_urgent() {
        let mut state = SessionState::new();
        state.escalate(Sentiment::NeedsAgent);
        assert_eq!(state.sentiment, Sentiment::NeedsAgent);
    }

    #[test]
    fn incident_details_preserve_first_write_order() {
        let mut state = SessionState::new();
        state.set_incident_detail("when", "yesterday");
        state.set_incident_detail("where", "Springfield");
        state.set_incident_detail("when", "this morning");
        assert_eq!(
            state.incident_details,
            vec![
                ("when".to_string(), "this morning".to_string()),
                ("where".to_string(), "Springfield".to_string()),
            ]
        );
    }

    #[test]
    fn summary_renders_fallbacks_for_empty_state() {
        let state = SessionState::new();
        let summary = state.render_handoff_summary();
        assert!(summary.contains("AGENT HANDOFF SUMMARY"));
        assert!(summary.contains("Caller: Unknown\n"));
        assert!(summary.contains("Verified: ✗ NO\n"));
        assert!(summary.contains("CUSTOMER GOAL:\nNot determined\n"));
        assert!(summary.contains("ISSUE DESCRIPTION:\nNo details provided\n"));
        assert!(summary.contains("STEPS ATTEMPTED:\n  None\n"));
        assert!(summary.contains("RETRIEVED KNOWLEDGE BASE ARTICLES:\n  None\n"));
        assert!(summary.contains("CONVERSATION TURNS: 0\n"));
        assert!(summary.contains("SENTIMENT: neutral\n"));
        // The incident block is omitted entirely when no details exist.
        assert!(!summary.contains("INCIDENT DETAILS"));
    }

    #[test]
    fn summary_lists_populated_sections() {
        let mut state = SessionState::new();
        state.set_caller_identity("POLICY123456");
        state.mark_verified();
        state.set_intent(Intent::FileClaim);
        state.set_issue_description("car hit a pole");
        state.set_incident_detail("when", "yesterday");
        state.set_incident_detail("where", "Springfield");
        state.push_step_tried("Took photos of damage");
        state.push_retrieved_doc("claim-filing.md");
        state.record_message(Role::User, "hello");

        let summary = state.render_handoff_summary();
        assert!(summary.contains("Caller: POLICY123456\n"));
        assert!(summary.contains("Verified: ✓ YES\n"));
        assert!(summary.contains("CUSTOMER GOAL:\nfile_claim\n"));
        assert!(summary.contains("ISSUE DESCRIPTION:\ncar hit a pole\n"));
        assert!(summary.contains("INCIDENT DETAILS:\n  when: yesterday\n  where: Springfield\n"));
        assert!(summary.contains("STEPS ATTEMPTED:\n  - Took photos of damage\n"));
        assert!(summary.contains("RETRIEVED KNOWLEDGE BASE ARTICLES:\n  - claim-filing.md\n"));
        assert!(summary.contains("CONVERSATION TURNS: 1\n"));
    }

    #[test]
    fn summary_is_idempotent() {
        let mut state = SessionState::new();
        state.set_intent(Intent::Billing);
        state.set_incident_detail("billing_type", "make_payment");
        assert_eq!(state.render_handoff_summary(), state.render_handoff_summary());
    }
}

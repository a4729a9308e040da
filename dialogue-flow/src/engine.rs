use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    error::{DialogueError, Result},
    session::Role,
    step::{Step, StepHandler, Turn},
    storage::Session,
};

/// Step-indexed dispatch machine: one utterance in, one prompt out.
///
/// Handlers are registered per [`Step`]; `execute_session` consumes one
/// caller utterance, mutates the session's state through the current step's
/// handler, and advances the session to the step named by the handler.
pub struct DialogueEngine {
    pub id: String,
    handlers: DashMap<Step, Arc<dyn StepHandler>>,
}

impl DialogueEngine {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            handlers: DashMap::new(),
        }
    }

    /// Registers a handler under the step it reports via `StepHandler::step`.
    pub fn register(&self, handler: Arc<dyn StepHandler>) -> &Self {
        self.handlers.insert(handler.step(), handler);
        self
    }

    pub fn handler(&self, step: Step) -> Option<Arc<dyn StepHandler>> {
        self.handlers.get(&step).map(|entry| entry.clone())
    }

    /// Consumes one utterance for the given session.
    ///
    /// Both sides of the exchange are recorded in the transcript around the
    /// handler call, except at the terminal step: once complete, every input
    /// yields the fixed completion turn and the state is not touched again.
    pub async fn execute_session(&self, session: &mut Session, utterance: &str) -> Result<Turn> {
        let step = session.current_step;

        if step.is_terminal() {
            debug!(session_id = %session.id, "input after completion, returning fixed response");
            return Ok(Turn::terminal());
        }

        let handler = self
            .handler(step)
            .ok_or_else(|| DialogueError::StepNotFound(step.to_string()))?;

        info!(session_id = %session.id, step = %step, "running step");

        session.state.record_message(Role::User, utterance);
        let turn = handler.handle(utterance, &mut session.state).await?;
        session.state.record_message(Role::Assistant, turn.prompt.clone());

        debug!(
            session_id = %session.id,
            from = %step,
            to = %turn.next_step,
            "step transition"
        );
        session.current_step = turn.next_step;

        Ok(turn)
    }
}

/// Builder mirroring the construction style of the engine's call sites:
/// register every handler once, then hand out the finished engine.
pub struct DialogueEngineBuilder {
    engine: DialogueEngine,
}

impl DialogueEngineBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            engine: DialogueEngine::new(id),
        }
    }

    pub fn register(self, handler: Arc<dyn StepHandler>) -> Self {
        self.engine.register(handler);
        self
    }

    pub fn build(self) -> DialogueEngine {
        self.engine
    }
}

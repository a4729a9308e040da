//! DialogueRunner – convenience wrapper that loads a session, feeds it one
//! caller utterance, and persists the updated session back to storage.
//!
//! Interactive surfaces (the HTTP service, the terminal demo) want exactly
//! one step per request: load, execute, save, reply. `DialogueRunner` makes
//! that a one-liner. Use `DialogueEngine::execute_session` directly when you
//! hold the `Session` yourself, e.g. in tests that assert on intermediate
//! state.

use std::sync::Arc;

use crate::{
    engine::DialogueEngine,
    error::{DialogueError, Result},
    step::Turn,
    storage::SessionStorage,
};

/// High-level helper that orchestrates the common _load → execute → save_
/// pattern.
#[derive(Clone)]
pub struct DialogueRunner {
    engine: Arc<DialogueEngine>,
    storage: Arc<dyn SessionStorage>,
}

impl DialogueRunner {
    pub fn new(engine: Arc<DialogueEngine>, storage: Arc<dyn SessionStorage>) -> Self {
        Self { engine, storage }
    }

    /// Feeds one utterance to the session and persists the result, so the
    /// next call starts where this one left off.
    pub async fn run(&self, session_id: &str, utterance: &str) -> Result<Turn> {
        let mut session = self
            .storage
            .get(session_id)
            .await?
            .ok_or_else(|| DialogueError::SessionNotFound(session_id.to_string()))?;

        let turn = self.engine.execute_session(&mut session, utterance).await?;

        self.storage.save(session).await?;

        Ok(turn)
    }
}

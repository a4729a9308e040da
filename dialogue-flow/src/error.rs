use thiserror::Error;

/// Errors surfaced by the dialogue plumbing.
///
/// Caller behavior never produces one of these: malformed menu input
/// re-prompts, a missing knowledge article degrades to "no citation", and a
/// failed verification leaves the session unverified but advancing. The
/// variants below indicate a misconfigured engine or an unknown session id.
#[derive(Error, Debug)]
pub enum DialogueError {
    #[error("No handler registered for step: {0}")]
    StepNotFound(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

pub type Result<T> = std::result::Result<T, DialogueError>;

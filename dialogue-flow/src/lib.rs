pub mod engine;
pub mod error;
pub mod flow;
pub mod kb;
pub mod runner;
pub mod session;
pub mod step;
pub mod steps;
pub mod storage;

// Re-export commonly used types
pub use engine::{DialogueEngine, DialogueEngineBuilder};
pub use error::{DialogueError, Result};
pub use flow::insurance_ivr_flow;
pub use kb::{DocumentMatcher, DocumentStore, PREVIEW_TRUNCATION_MARKER};
pub use runner::DialogueRunner;
pub use session::{Intent, Role, Sentiment, SessionState, TranscriptEntry};
pub use step::{SESSION_COMPLETE_MESSAGE, Step, StepHandler, Turn};
pub use storage::{InMemorySessionStorage, Session, SessionStorage};

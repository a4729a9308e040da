// Interactive terminal driver for the insurance IVR flow: one line in, one
// prompt out, until the conversation completes. The knowledge base is read
// from KB_DIR (default "kb").
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use dialogue_flow::{
    DialogueRunner, DocumentMatcher, DocumentStore, InMemorySessionStorage, Session,
    SessionStorage, insurance_ivr_flow,
};

// The terminal has room for a wider article preview than the chat surface.
const PREVIEW_LINES: usize = 15;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let kb_dir = std::env::var("KB_DIR").unwrap_or_else(|_| "kb".to_string());
    let store = Arc::new(DocumentStore::load_dir(&kb_dir));
    let matcher = DocumentMatcher::new(store);

    let engine = Arc::new(insurance_ivr_flow(matcher, PREVIEW_LINES));
    let storage: Arc<dyn SessionStorage> = Arc::new(InMemorySessionStorage::new());
    let runner = DialogueRunner::new(engine, storage.clone());

    let session = Session::new();
    let session_id = session.id.clone();
    storage.save(session).await?;

    println!("=== Insurance IVR Simulator ===\n");
    println!("Session ID: {}\n", session_id);
    print!("Please enter your policy number: ");
    io::stdout().flush()?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let utterance = line?;
        let turn = runner.run(&session_id, &utterance).await?;

        println!("\n{}\n", turn.prompt);

        if turn.next_step.is_terminal() {
            break;
        }
        print!("> ");
        io::stdout().flush()?;
    }

    Ok(())
}

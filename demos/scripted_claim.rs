// Non-interactive walkthrough of the claim-filing branch: drives the flow
// with a fixed set of utterances and prints each exchange, ending with the
// agent handoff summary.
use std::sync::Arc;

use dialogue_flow::{
    DialogueRunner, DocumentMatcher, DocumentStore, InMemorySessionStorage, Session,
    SessionStorage, insurance_ivr_flow,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let store = Arc::new(DocumentStore::from_entries(vec![(
        "claim-filing.md",
        "# Filing a Claim\n\
         1. Have your policy number ready.\n\
         2. Document the damage with photos.\n\
         3. A claims adjuster will contact you within two business days.",
    )]));
    let matcher = DocumentMatcher::new(store);

    let engine = Arc::new(insurance_ivr_flow(matcher, 15));
    let storage: Arc<dyn SessionStorage> = Arc::new(InMemorySessionStorage::new());
    let runner = DialogueRunner::new(engine, storage.clone());

    let session = Session::new();
    let session_id = session.id.clone();
    storage.save(session).await?;

    println!("Session ID: {}\n", session_id);

    let script = [
        "POLICY123456",
        "1",
        "car hit a pole",
        "yesterday",
        "Springfield",
        "dented door",
        "yes",
        "2",
    ];

    for utterance in script {
        println!("caller> {}", utterance);
        let turn = runner.run(&session_id, utterance).await?;
        println!("ivr> {}\n", turn.prompt);
    }

    Ok(())
}

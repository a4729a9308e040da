use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::{HeaderValue, Request, StatusCode},
    middleware::{Next, from_fn},
    response::Json,
    routing::{get, post},
};
use dialogue_flow::{
    DialogueError, DialogueRunner, DocumentMatcher, DocumentStore, InMemorySessionStorage,
    Session, SessionStorage, insurance_ivr_flow,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{Instrument, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// Article preview width for the chat surface. The terminal demo uses a
/// wider preview; neither value is baked into the matcher.
const PREVIEW_LINES: usize = 10;

#[derive(Clone)]
struct AppState {
    runner: DialogueRunner,
    session_storage: Arc<dyn SessionStorage>,
}

#[derive(Debug, Deserialize)]
struct ExecuteRequest {
    session_id: Option<String>,
    content: String,
}

#[derive(Debug, Serialize)]
struct ExecuteResponse {
    session_id: String,
    response: String,
    step: String,
}

/// Initialize structured JSON tracing based on environment variables
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ivr_service=debug,dialogue_flow=debug,tower_http=debug".into());

    match log_format.as_str() {
        "pretty" => {
            // Human-readable logging for development
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        _ => {
            // Structured JSON logging for production
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true),
                )
                .init();
        }
    }
}

/// Middleware to add correlation ID to all requests
async fn correlation_id_middleware(
    mut request: Request<axum::body::Body>,
    next: Next,
) -> axum::response::Response {
    let correlation_id = Uuid::new_v4().to_string();

    request.headers_mut().insert(
        "x-correlation-id",
        HeaderValue::from_str(&correlation_id).unwrap(),
    );

    let span = tracing::info_span!("http_request", correlation_id = %correlation_id);

    next.run(request).instrument(span).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let kb_dir = std::env::var("KB_DIR").unwrap_or_else(|_| "kb".to_string());
    let store = Arc::new(DocumentStore::load_dir(&kb_dir));
    if store.is_empty() {
        error!(kb_dir = %kb_dir, "knowledge base is empty, callers will get no article citations");
    }

    let matcher = DocumentMatcher::new(store);
    let engine = Arc::new(insurance_ivr_flow(matcher, PREVIEW_LINES));
    let session_storage: Arc<dyn SessionStorage> = Arc::new(InMemorySessionStorage::new());

    let app_state = AppState {
        runner: DialogueRunner::new(engine, session_storage.clone()),
        session_storage,
    };

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/execute", post(execute_turn))
        .route("/session/{id}", get(get_session))
        .layer(from_fn(correlation_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("Server running on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}

async fn execute_turn(
    State(state): State<AppState>,
    Json(request): Json<ExecuteRequest>,
) -> Result<Json<ExecuteResponse>, StatusCode> {
    let session_id_provided = request.session_id.is_some();

    // A missing session id starts a fresh conversation at verification.
    let session_id = match request.session_id {
        Some(id) => id,
        None => {
            let session = Session::new();
            let id = session.id.clone();
            info!(session_id = %id, "creating new session");
            if let Err(e) = state.session_storage.save(session).await {
                error!(session_id = %id, error = %e, "failed to save new session");
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            }
            id
        }
    };

    info!(
        session_id = %session_id,
        content_length = %request.content.len(),
        "processing execute request"
    );

    let turn = match state.runner.run(&session_id, &request.content).await {
        Ok(turn) => turn,
        Err(DialogueError::SessionNotFound(_)) if session_id_provided => {
            error!(session_id = %session_id, "session not found");
            return Err(StatusCode::NOT_FOUND);
        }
        Err(e) => {
            error!(session_id = %session_id, error = %e, "failed to execute turn");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    info!(
        session_id = %session_id,
        next_step = %turn.next_step,
        "request completed successfully"
    );

    Ok(Json(ExecuteResponse {
        session_id,
        response: turn.prompt,
        step: turn.next_step.to_string(),
    }))
}

async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Session>, StatusCode> {
    match state.session_storage.get(&session_id).await {
        Ok(Some(session)) => Ok(Json(session)),
        Ok(None) => {
            info!(session_id = %session_id, "session not found");
            Err(StatusCode::NOT_FOUND)
        }
        Err(e) => {
            error!(session_id = %session_id, error = %e, "failed to get session");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

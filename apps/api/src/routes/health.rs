use axum::{extract::State, response::Html, Json};
use serde_json::{json, Value};

use crate::state::AppState;

const WELCOME_HTML: &str = "<h1>Welcome to the Resume Analyzer API</h1>\
<p>Use the /analyze endpoint to process requests.</p>";

/// GET /
pub async fn home_handler() -> Html<&'static str> {
    Html(WELCOME_HTML)
}

/// GET /health
/// Returns a simple status object with service version and loaded model.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-analyzer-api",
        "model": state.scorer.model_name(),
    }))
}

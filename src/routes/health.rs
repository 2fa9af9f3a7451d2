use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::SharedState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub runner: String,
    pub started_at: String,
    pub uptime_secs: i64,
    pub results_recorded: usize,
}

/// GET /health
pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let uptime_secs = (chrono::Utc::now() - state.started_at).num_seconds();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        runner: state.runner.label().to_string(),
        started_at: state.started_at.to_rfc3339(),
        uptime_secs,
        results_recorded: state.results.len().await,
    })
}

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::catalog::TestCase;
use crate::controller;
use crate::error::DashboardError;
use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub ok: bool,
    pub message: String,
}

/// GET /api/tests
pub async fn list_tests(State(state): State<SharedState>) -> Json<Vec<TestCase>> {
    let tests = state.catalog.read().await.all().to_vec();
    Json(tests)
}

/// POST /api/tests/{id}/run: mark the test running and settle it in the
/// background. Progress shows up in /api/tests and /api/results.
pub async fn trigger_test(
    State(state): State<SharedState>,
    Path(id): Path<u32>,
) -> Result<Json<MessageResponse>, DashboardError> {
    let pending = match controller::begin_run(&state, id).await? {
        Some(pending) => pending,
        None => {
            return Ok(Json(MessageResponse {
                ok: false,
                message: "Test already running".to_string(),
            }))
        }
    };

    let message = format!("{} started", pending.test_name);
    tokio::spawn(async move {
        controller::complete_run(&state, pending).await;
    });

    Ok(Json(MessageResponse { ok: true, message }))
}

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::environments::Environment;
use crate::error::DashboardError;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct AddEnvironmentRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// GET /api/environments
pub async fn list_environments(State(state): State<SharedState>) -> Json<Vec<Environment>> {
    let environments = state.environments.read().await.list().to_vec();
    Json(environments)
}

/// POST /api/environments: blank name or url is accepted and ignored.
pub async fn add_environment(
    State(state): State<SharedState>,
    Json(body): Json<AddEnvironmentRequest>,
) -> Result<Response, DashboardError> {
    let added = state
        .environments
        .write()
        .await
        .add(&body.name, &body.url)?;

    Ok(match added {
        Some(env) => {
            info!("Added environment {} ({})", env.name, env.url);
            Json(env).into_response()
        }
        None => Json(serde_json::json!({ "added": false })).into_response(),
    })
}

/// POST /api/environments/{id}/toggle
pub async fn toggle_environment(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Environment>>, DashboardError> {
    let mut environments = state.environments.write().await;
    if environments.get(&id).is_none() {
        return Err(DashboardError::EnvironmentNotFound(id));
    }
    environments.toggle(&id)?;
    Ok(Json(environments.list().to_vec()))
}

/// DELETE /api/environments/{id}: deleting "default" is a no-op.
pub async fn delete_environment(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, DashboardError> {
    let removed = state.environments.write().await.remove(&id)?;
    if removed {
        info!("Removed environment {}", id);
    }
    Ok(Json(serde_json::json!({ "removed": removed })))
}

/// GET /api/environments/active
pub async fn active_environment(
    State(state): State<SharedState>,
) -> Result<Json<Environment>, DashboardError> {
    let active = state.environments.read().await.active().cloned();
    active.map(Json).ok_or(DashboardError::Configuration)
}

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::DashboardError;
use crate::preferences;
use crate::state::SharedState;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesResponse {
    pub dark_mode: bool,
}

#[derive(Deserialize)]
pub struct DarkModeRequest {
    pub enabled: bool,
}

/// GET /api/preferences
pub async fn get_preferences(
    State(state): State<SharedState>,
) -> Result<Json<PreferencesResponse>, DashboardError> {
    let dark_mode = preferences::dark_mode(state.store.as_ref())?;
    Ok(Json(PreferencesResponse { dark_mode }))
}

/// PUT /api/preferences/dark-mode
pub async fn set_dark_mode(
    State(state): State<SharedState>,
    Json(body): Json<DarkModeRequest>,
) -> Result<Json<PreferencesResponse>, DashboardError> {
    let _guard = state.preferences_lock.lock().await;
    preferences::set_dark_mode(state.store.as_ref(), body.enabled)?;
    Ok(Json(PreferencesResponse {
        dark_mode: body.enabled,
    }))
}

/// POST /api/preferences/dark-mode/toggle
pub async fn toggle_dark_mode(
    State(state): State<SharedState>,
) -> Result<Json<PreferencesResponse>, DashboardError> {
    let _guard = state.preferences_lock.lock().await;
    let dark_mode = preferences::toggle_dark_mode(state.store.as_ref())?;
    Ok(Json(PreferencesResponse { dark_mode }))
}

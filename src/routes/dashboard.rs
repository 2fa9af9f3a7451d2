use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::state::{SharedState, View};

const DASHBOARD_HTML: &str = include_str!("../../static/dashboard.html");

pub async fn index() -> Response {
    let mut resp = Html(DASHBOARD_HTML).into_response();
    resp.headers_mut().insert(
        axum::http::header::CACHE_CONTROL,
        axum::http::HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    resp
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ViewBody {
    pub view: View,
}

/// GET /api/view
pub async fn get_view(State(state): State<SharedState>) -> Json<ViewBody> {
    Json(ViewBody {
        view: state.current_view().await,
    })
}

/// PUT /api/view
pub async fn set_view(
    State(state): State<SharedState>,
    Json(body): Json<ViewBody>,
) -> Json<ViewBody> {
    state.set_view(body.view).await;
    Json(body)
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("No active environment is configured")]
    Configuration,

    #[error("Test {0} not found")]
    TestNotFound(u32),

    #[error("Environment {0} not found")]
    EnvironmentNotFound(String),

    #[error("Remote bridge error: {0}")]
    Remote(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match &self {
            DashboardError::Configuration => StatusCode::CONFLICT,
            DashboardError::TestNotFound(_) => StatusCode::NOT_FOUND,
            DashboardError::EnvironmentNotFound(_) => StatusCode::NOT_FOUND,
            DashboardError::Remote(_) => StatusCode::BAD_GATEWAY,
            DashboardError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::Json(_) => StatusCode::BAD_REQUEST,
            DashboardError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({
            "error": self.to_string(),
        });

        (status, axum::Json(body)).into_response()
    }
}

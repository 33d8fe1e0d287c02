use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::checkup::CheckupServiceError;
use crate::config::ConfigError;
use crate::telemetry::TelemetryError;

/// Top-level application error for startup and server failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("server error: {0}")]
    Server(#[from] axum::Error),
    #[error("checkup error: {0}")]
    Checkup(#[from] CheckupServiceError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Checkup(error) = self {
            return error.into_response();
        }
        let body = Json(json!({ "error": self.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

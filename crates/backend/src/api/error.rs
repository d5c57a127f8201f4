use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::shared::data::sales_csv::DataError;

/// Handler error rendered as a JSON `{"error": "..."}` body.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<DataError> for AppError {
    fn from(e: DataError) -> Self {
        tracing::error!("Sales insights: {}", e);
        AppError::internal(e.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(e: tokio::task::JoinError) -> Self {
        tracing::error!("Sales insights: worker task failed: {}", e);
        AppError::internal("dashboard computation failed")
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        tracing::error!("Sales insights: failed to serialize page: {}", e);
        AppError::internal("failed to render dashboard")
    }
}

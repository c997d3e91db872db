use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Internal { message: String, details: String },
}

impl AppError {
    pub fn internal(message: impl Into<String>, details: impl std::fmt::Display) -> Self {
        AppError::Internal {
            message: message.into(),
            details: details.to_string(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            AppError::Internal { message, details } => {
                write!(f, "Internal Error: {message}: {details}")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::NotFound(msg) => {
                tracing::warn!("Not found: {msg}");
                (StatusCode::NOT_FOUND, json!({ "error": msg }))
            }
            AppError::BadRequest(msg) => {
                tracing::warn!("Bad request: {msg}");
                (StatusCode::BAD_REQUEST, json!({ "error": msg }))
            }
            AppError::Internal { message, details } => {
                tracing::error!("Internal error: {message}: {details}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": message, "details": details }),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

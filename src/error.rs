use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Input rejected before anything was persisted
    #[error("Invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("Unauthorized")]
    Unauthorized,

    /// Workout is missing or owned by someone else; callers cannot tell which
    #[error("Workout not found")]
    WorkoutNotFound,

    #[error("{0} not found")]
    NotFound(&'static str),

    /// Stored rows contradict the schema's relationships
    #[error("Data integrity violation: {0}")]
    IntegrityViolation(String),
}

impl AppError {
    /// Shorthand for a field-level validation failure
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        AppError::Validation {
            field,
            message: message.into(),
        }
    }
}

/// Implement IntoResponse to convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
            AppError::Migration(ref e) => {
                tracing::error!("Migration error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
            AppError::IntegrityViolation(ref detail) => {
                tracing::error!("Data integrity violation: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
            AppError::Validation { field, ref message } => (
                StatusCode::BAD_REQUEST,
                json!({ "error": message, "field": field }),
            ),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, json!({ "error": "Unauthorized" })),
            AppError::WorkoutNotFound => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Workout not found" }),
            ),
            AppError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                json!({ "error": format!("{} not found", what) }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for application results
pub type Result<T> = std::result::Result<T, AppError>;

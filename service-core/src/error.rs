use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Generic message returned for every 5xx produced by this crate.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    /// The completion provider failed; surfaced as a 500 like any other fault.
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

/// Wire shape of every error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl ErrorBody {
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            error: INTERNAL_ERROR_MESSAGE.to_string(),
            message: Some(message.into()),
            required: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::MissingFields(required) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: MISSING_FIELDS_MESSAGE.to_string(),
                    message: None,
                    required: Some(required),
                },
            ),
            AppError::InternalError(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::internal(err.to_string()),
            ),
            AppError::Upstream(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::internal(msg),
            ),
            AppError::ConfigError(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::internal(format!("Configuration error: {}", err)),
            ),
        };

        (status, Json(body)).into_response()
    }
}

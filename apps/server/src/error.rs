use std::io::Error as IoError;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;
use vigil::MonitorError;

/// Fatal startup errors surfaced from `main`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0:#}")]
    Io(#[from] IoError),
    #[error("Address parsing error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
    #[error("Configuration error: {0}")]
    Config(#[from] vigil::config::Error),
    #[error("{0:#}")]
    Init(#[from] anyhow::Error),
}

/// Request-level failures, rendered as `{"error": "..."}` bodies.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("URL is required")]
    MissingUrl,
    /// A path id that is not even a UUID names no health check.
    #[error("Health check not found")]
    UnknownId,
    #[error(transparent)]
    Monitor(#[from] MonitorError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingUrl => StatusCode::BAD_REQUEST,
            ApiError::UnknownId => StatusCode::NOT_FOUND,
            ApiError::Monitor(MonitorError::InvalidUrl(_) | MonitorError::InvalidInterval(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Monitor(MonitorError::NotFound(_)) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

//! Error type shared by every movie catalog crate
//!
//! `CatalogError` maps onto the HTTP status codes the API reports and renders
//! itself as the standard response envelope.

use crate::response::ApiResponse;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use std::time::Duration;

/// Catalog error
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Request input failed validation
    #[error("{0}")]
    Validation(String),

    /// Requested entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// Entity with the same unique key already exists
    #[error("{0}")]
    Conflict(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Store operation exceeded its deadline
    #[error("Operation '{operation}' timed out after {timeout:?}")]
    Timeout {
        operation: String,
        timeout: Duration,
    },

    /// Third-party metadata API failed
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Object store operation failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    ConfigurationError {
        message: String,
        key: Option<String>,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound("Record not found".to_string()),
            other => Self::Database(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for CatalogError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::Database(format!("migration failed: {}", err))
    }
}

impl ResponseError for CatalogError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        ApiResponse::<()>::error(status.as_u16(), self.to_string()).into_response()
    }
}

//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use ripple_shared::ErrorResponse;
use std::fmt;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Unauthorized,
    Conflict(String),
    Internal(String),
    Validation(Vec<String>),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::Validation(errors) => write!(f, "Validation errors: {:?}", errors),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Unauthorized => ErrorResponse::unauthorized(),
            AppError::Conflict(detail) => ErrorResponse::conflict(detail),
            AppError::Internal(detail) => {
                // Log internal errors; never leak them to the client
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
            AppError::Validation(errors) => ErrorResponse::validation(errors.join(", ")),
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<ripple_core::error::DomainError> for AppError {
    fn from(err: ripple_core::error::DomainError) -> Self {
        match err {
            ripple_core::error::DomainError::NotFound(entity) => {
                AppError::NotFound(format!("{} not found", entity))
            }
            ripple_core::error::DomainError::Validation(msg) => AppError::Validation(vec![msg]),
            ripple_core::error::DomainError::Duplicate(msg) => AppError::Conflict(msg),
            ripple_core::error::DomainError::Unauthorized => AppError::Unauthorized,
            ripple_core::error::DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<ripple_core::error::RepoError> for AppError {
    fn from(err: ripple_core::error::RepoError) -> Self {
        match err {
            ripple_core::error::RepoError::NotFound => {
                AppError::NotFound("Resource not found".to_string())
            }
            ripple_core::error::RepoError::Constraint(msg) => AppError::Conflict(msg),
            ripple_core::error::RepoError::Contention(msg) => {
                // Transient by definition; tell the client to retry
                tracing::warn!("Write contention: {}", msg);
                AppError::Conflict(
                    "The request conflicted with a concurrent update; please retry.".to_string(),
                )
            }
            ripple_core::error::RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            ripple_core::error::RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

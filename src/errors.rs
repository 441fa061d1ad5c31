// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Comprehensive error enum for all possible failures
/// Each variant maps to appropriate HTTP status code and error response
#[derive(Error, Debug)]
pub enum VenueError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Venue name already in use: {0}")]
    AlreadyExists(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Storage error: {0}")]
    StorageError(String),
}

/// Convert VenueError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON responses
impl ResponseError for VenueError {
    fn error_response(&self) -> HttpResponse {
        let (status, error_code) = match self {
            VenueError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            VenueError::AlreadyExists(_) => (StatusCode::CONFLICT, "ALREADY_EXISTS"),
            VenueError::DatabaseError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            VenueError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            VenueError::ValidationError(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            VenueError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            VenueError::StorageError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
        };

        let body = json!({
            "error": {
                "code": error_code,
                "message": self.to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        HttpResponse::build(status).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            VenueError::NotFound(_) => StatusCode::NOT_FOUND,
            VenueError::AlreadyExists(_) => StatusCode::CONFLICT,
            VenueError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            VenueError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            VenueError::ValidationError(_) => StatusCode::BAD_REQUEST,
            VenueError::Unauthorized => StatusCode::UNAUTHORIZED,
            VenueError::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

//! Application Error Types
//!
//! Centralized error handling with Axum integration.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::services::ServiceError;

/// Numeric error codes returned in every error body.
///
/// The first three digits are the HTTP status, the last two identify the
/// resource the error is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ErrorCode {
    BadRequest = 40000,
    InvalidTag = 40001,
    InvalidCertificate = 40002,
    InvalidUser = 40003,
    InvalidUserOrder = 40004,
    InvalidPage = 40005,
    ValidationFailed = 40006,
    Unauthorized = 40100,
    InvalidCredentials = 40101,
    Forbidden = 40300,
    NotFound = 40400,
    TagNotFound = 40401,
    CertificateNotFound = 40402,
    UserNotFound = 40403,
    UserOrderNotFound = 40404,
    Conflict = 40900,
    Internal = 50000,
}

impl ErrorCode {
    pub fn as_u32(self) -> u32 {
        self as u32
    }

    /// HTTP status encoded in the leading digits of the code.
    pub fn status(self) -> StatusCode {
        StatusCode::from_u16((self.as_u32() / 100) as u16)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        errors: Vec<FieldError>,
    },

    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

/// Field-level validation error
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl AppError {
    /// Map a unique or foreign-key violation to `Conflict`, anything else to `Database`.
    pub fn from_constraint(e: sqlx::Error, message: impl Into<String>) -> Self {
        match &e {
            sqlx::Error::Database(db_err)
                if db_err.is_unique_violation() || db_err.is_foreign_key_violation() =>
            {
                AppError::Conflict(message.into())
            }
            _ => AppError::Database(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message, errors) = match self {
            AppError::NotFound(msg) => (ErrorCode::NotFound, msg, None),
            AppError::BadRequest(msg) => (ErrorCode::BadRequest, msg, None),
            AppError::Unauthorized(msg) => (ErrorCode::Unauthorized, msg, None),
            AppError::InvalidCredentials => (
                ErrorCode::InvalidCredentials,
                "Invalid name or password".into(),
                None,
            ),
            AppError::Forbidden(msg) => (ErrorCode::Forbidden, msg, None),
            AppError::Conflict(msg) => (ErrorCode::Conflict, msg, None),
            AppError::Validation { message, errors } => {
                (ErrorCode::ValidationFailed, message, Some(errors))
            }
            AppError::Service(e) => {
                if matches!(e, ServiceError::Internal(_)) {
                    tracing::error!("Service error: {}", e);
                    (ErrorCode::Internal, "Internal server error".into(), None)
                } else {
                    (e.code(), e.to_string(), None)
                }
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (ErrorCode::Internal, "Internal server error".into(), None)
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (ErrorCode::Internal, "Internal server error".into(), None)
            }
        };

        let body = ErrorResponse {
            code: code.as_u32(),
            message,
            errors,
        };

        (code.status(), Json(body)).into_response()
    }
}

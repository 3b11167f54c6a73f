//! Service Errors
//!
//! Typed errors returned by application services, and the translation of
//! repository failures into them.

use validator::ValidationErrors;

use crate::domain::PageRequestError;
use crate::shared::error::{AppError, ErrorCode};
use crate::shared::validation;

/// Resource kinds a service error can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Tag,
    Certificate,
    User,
    UserOrder,
}

impl Resource {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Tag => "Tag",
            Self::Certificate => "Certificate",
            Self::User => "User",
            Self::UserOrder => "Order",
        }
    }

    pub fn invalid_code(&self) -> ErrorCode {
        match self {
            Self::Tag => ErrorCode::InvalidTag,
            Self::Certificate => ErrorCode::InvalidCertificate,
            Self::User => ErrorCode::InvalidUser,
            Self::UserOrder => ErrorCode::InvalidUserOrder,
        }
    }

    pub fn not_found_code(&self) -> ErrorCode {
        match self {
            Self::Tag => ErrorCode::TagNotFound,
            Self::Certificate => ErrorCode::CertificateNotFound,
            Self::User => ErrorCode::UserNotFound,
            Self::UserOrder => ErrorCode::UserOrderNotFound,
        }
    }
}

/// Service layer errors
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{message}")]
    InvalidEntity { code: ErrorCode, message: String },

    #[error("{message}")]
    EntityNotFound { code: ErrorCode, message: String },

    #[error(transparent)]
    InvalidPage(#[from] PageRequestError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn invalid(resource: Resource, message: impl Into<String>) -> Self {
        Self::InvalidEntity {
            code: resource.invalid_code(),
            message: message.into(),
        }
    }

    pub fn not_found(resource: Resource, id: i64) -> Self {
        Self::EntityNotFound {
            code: resource.not_found_code(),
            message: format!("{} with id {} not found", resource.name(), id),
        }
    }

    /// Reject a request that failed its declared constraints.
    pub fn from_validation(resource: Resource, errors: ValidationErrors) -> Self {
        Self::invalid(
            resource,
            validation::summary(&validation::field_errors(&errors)),
        )
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidEntity { code, .. } | Self::EntityNotFound { code, .. } => *code,
            Self::InvalidPage(_) => ErrorCode::InvalidPage,
            Self::Internal(_) => ErrorCode::Internal,
        }
    }

    /// Translate a repository failure for `resource`.
    ///
    /// Constraint violations become `InvalidEntity`, missing rows become
    /// `EntityNotFound`, and driver failures become `Internal`.
    pub fn from_repository(resource: Resource, error: AppError) -> Self {
        match error {
            AppError::Conflict(message) | AppError::BadRequest(message) => {
                Self::invalid(resource, message)
            }
            AppError::NotFound(message) => Self::EntityNotFound {
                code: resource.not_found_code(),
                message,
            },
            AppError::Service(inner) => inner,
            other => Self::Internal(other.to_string()),
        }
    }
}

/// Attach a resource to repository results so `?` yields a `ServiceError`.
pub trait RepositoryResultExt<T> {
    fn for_resource(self, resource: Resource) -> Result<T, ServiceError>;
}

impl<T> RepositoryResultExt<T> for Result<T, AppError> {
    fn for_resource(self, resource: Resource) -> Result<T, ServiceError> {
        self.map_err(|e| ServiceError::from_repository(resource, e))
    }
}

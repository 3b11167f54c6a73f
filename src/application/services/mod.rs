//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **AuthService**: Registration, login, JWT access tokens
//! - **TagService**: Tag lookup, creation and deletion
//! - **CertificateService**: Certificate catalog search and maintenance
//! - **UserService**: User account lookup
//! - **UserOrderService**: Order placement and history

pub mod auth_service;
pub mod certificate_service;
pub mod error;
pub mod order_service;
pub mod tag_service;
pub mod user_service;

pub use auth_service::{AuthError, AuthService, AuthServiceImpl, Claims};
pub use certificate_service::{CertificateService, CertificateServiceImpl};
pub use error::{RepositoryResultExt, Resource, ServiceError};
pub use order_service::{UserOrderService, UserOrderServiceImpl};
pub use tag_service::{TagService, TagServiceImpl};
pub use user_service::{UserService, UserServiceImpl};

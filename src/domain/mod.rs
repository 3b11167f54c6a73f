//! # Domain Layer
//!
//! The domain layer contains the core business types of the certificate store.
//! It is independent of the web framework and of the database driver.
//!
//! ## Structure
//!
//! - **entities**: Tag, Certificate, User, UserOrder and their repository traits
//! - **value_objects**: Pagination and certificate search criteria
//! - **services**: Access rules shared by the HTTP layer
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository traits define data access contracts
//! - Entities are plain data; behavior lives in services

pub mod entities;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use value_objects::*;

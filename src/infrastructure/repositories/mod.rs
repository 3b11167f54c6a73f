//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.
//!
//! This module provides concrete implementations of the repository traits
//! defined in the domain layer. Each repository handles data access for
//! a specific entity type.
//!
//! ## Available Repositories
//!
//! - **TagRepository** - Tags and the top-spender tag statistic
//! - **CertificateRepository** - Certificates with filtering and tag links
//! - **UserRepository** - User accounts
//! - **OrderRepository** - User orders
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use gift_certificates::infrastructure::repositories::{
//!     PgCertificateRepository, PgOrderRepository, PgTagRepository, PgUserRepository,
//! };
//!
//! async fn setup_repositories(pool: PgPool) {
//!     let tag_repo = PgTagRepository::new(pool.clone());
//!     let certificate_repo = PgCertificateRepository::new(pool.clone());
//!     let user_repo = PgUserRepository::new(pool.clone());
//!     let order_repo = PgOrderRepository::new(pool);
//! }
//! ```

pub mod certificate_repository;
pub mod order_repository;
pub mod tag_repository;
pub mod user_repository;

pub use certificate_repository::PgCertificateRepository;
pub use order_repository::PgOrderRepository;
pub use tag_repository::PgTagRepository;
pub use user_repository::PgUserRepository;

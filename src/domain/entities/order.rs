//! User order entity and repository trait.
//!
//! Maps to the `user_orders` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Page, PageRequest};
use crate::shared::error::AppError;

/// A purchase of one certificate by one user.
///
/// Maps to the `user_orders` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - user_id: BIGINT NOT NULL REFERENCES users(id)
/// - certificate_id: BIGINT NOT NULL REFERENCES certificates(id)
/// - cost: INTEGER NOT NULL
/// - purchase_date: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserOrder {
    pub id: i64,
    pub user_id: i64,
    pub certificate_id: i64,

    /// Certificate price at the time of purchase
    pub cost: i32,

    pub purchase_date: DateTime<Utc>,
}

/// Data needed to insert an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserOrder {
    pub user_id: i64,
    pub certificate_id: i64,
    pub cost: i32,
}

/// Repository trait for UserOrder data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// List orders ordered by id.
    async fn find_all(&self, page: PageRequest) -> Result<Page<UserOrder>, AppError>;

    async fn find_all_by_user(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> Result<Page<UserOrder>, AppError>;

    async fn find_all_by_certificate(
        &self,
        certificate_id: i64,
        page: PageRequest,
    ) -> Result<Page<UserOrder>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<UserOrder>, AppError>;

    async fn count(&self) -> Result<i64, AppError>;

    /// Insert an order. Unknown user or certificate yields `AppError::Conflict`.
    async fn create(&self, order: &NewUserOrder) -> Result<UserOrder, AppError>;
}

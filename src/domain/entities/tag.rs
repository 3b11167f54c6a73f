//! Tag entity and repository trait.
//!
//! Maps to the `tags` table in the database schema.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Page, PageRequest};
use crate::shared::error::AppError;

/// A label attached to certificates.
///
/// Maps to the `tags` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - name: VARCHAR(25) NOT NULL UNIQUE
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

impl Tag {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Repository trait for Tag data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// List tags ordered by id.
    async fn find_all(&self, page: PageRequest) -> Result<Page<Tag>, AppError>;

    /// List the tags assigned to a certificate, ordered by id.
    async fn find_all_by_certificate(
        &self,
        certificate_id: i64,
        page: PageRequest,
    ) -> Result<Page<Tag>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Tag>, AppError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, AppError>;

    /// Most used tag across the orders of the user whose orders cost the most in total.
    async fn find_most_used_tag_of_top_spender(&self) -> Result<Option<Tag>, AppError>;

    async fn count(&self) -> Result<i64, AppError>;

    /// Insert a tag. A duplicate name yields `AppError::Conflict`.
    async fn create(&self, name: &str) -> Result<Tag, AppError>;

    /// Delete a tag and its certificate links. A missing id yields `AppError::NotFound`.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

//! Certificate entity and repository trait.
//!
//! Maps to the `certificates` table; the tag set lives in `certificate_tags`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Tag;
use crate::domain::value_objects::{CertificateFilter, Page, PageRequest};
use crate::shared::error::AppError;

/// A purchasable gift certificate.
///
/// Maps to the `certificates` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - name: VARCHAR(50) NOT NULL
/// - description: VARCHAR(3000) NOT NULL
/// - price: INTEGER NOT NULL CHECK (price > 0)
/// - duration: INTEGER NOT NULL CHECK (duration > 0), in days
/// - create_date: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - last_update_date: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: i32,
    /// Validity period in days
    pub duration: i32,
    pub create_date: DateTime<Utc>,
    pub last_update_date: DateTime<Utc>,
    /// Assigned tags, ordered by id
    pub tags: Vec<Tag>,
}

impl Certificate {
    pub fn tag_ids(&self) -> Vec<i64> {
        self.tags.iter().map(|t| t.id).collect()
    }
}

/// Data needed to insert a certificate. Tags must already exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCertificate {
    pub name: String,
    pub description: String,
    pub price: i32,
    pub duration: i32,
    pub tags: Vec<Tag>,
}

/// Repository trait for Certificate data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CertificateRepository: Send + Sync {
    /// List certificates matching the filter.
    async fn find_all(
        &self,
        filter: &CertificateFilter,
        page: PageRequest,
    ) -> Result<Page<Certificate>, AppError>;

    /// List certificates carrying a tag, ordered by id.
    async fn find_all_by_tag(
        &self,
        tag_id: i64,
        page: PageRequest,
    ) -> Result<Page<Certificate>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Certificate>, AppError>;

    async fn count(&self) -> Result<i64, AppError>;

    /// Insert a certificate with its tag links in one transaction.
    async fn create(&self, certificate: &NewCertificate) -> Result<Certificate, AppError>;

    /// Replace all fields and the tag set. A missing id yields `AppError::NotFound`.
    async fn update(&self, certificate: &Certificate) -> Result<Certificate, AppError>;

    /// A missing id yields `AppError::NotFound`; existing orders yield `AppError::Conflict`.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

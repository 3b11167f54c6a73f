//! Tag Service
//!
//! Handles tag lookup, creation and deletion.

use std::sync::Arc;

use async_trait::async_trait;
use validator::Validate;

use super::error::{RepositoryResultExt, Resource, ServiceError};
use crate::application::dto::{CreateTagRequest, TagResponse};
use crate::domain::{CertificateRepository, Page, PageRequest, TagRepository};

/// Tag service trait
#[async_trait]
pub trait TagService: Send + Sync {
    /// List all tags ordered by id
    async fn find_all(&self, page: PageRequest) -> Result<Page<TagResponse>, ServiceError>;

    /// List the tags assigned to a certificate
    async fn find_all_by_certificate(
        &self,
        certificate_id: i64,
        page: PageRequest,
    ) -> Result<Page<TagResponse>, ServiceError>;

    async fn find(&self, id: i64) -> Result<Option<TagResponse>, ServiceError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<TagResponse>, ServiceError>;

    /// Most used tag of the user with the highest total order cost
    async fn find_most_used_tag_of_top_spender(&self)
        -> Result<Option<TagResponse>, ServiceError>;

    async fn count(&self) -> Result<i64, ServiceError>;

    /// Create a tag; a duplicate name is an invalid tag
    async fn create(&self, request: CreateTagRequest) -> Result<TagResponse, ServiceError>;

    async fn delete(&self, id: i64) -> Result<(), ServiceError>;
}

/// TagService implementation
pub struct TagServiceImpl<T, C>
where
    T: TagRepository,
    C: CertificateRepository,
{
    tag_repo: Arc<T>,
    certificate_repo: Arc<C>,
}

impl<T, C> TagServiceImpl<T, C>
where
    T: TagRepository,
    C: CertificateRepository,
{
    pub fn new(tag_repo: Arc<T>, certificate_repo: Arc<C>) -> Self {
        Self {
            tag_repo,
            certificate_repo,
        }
    }
}

#[async_trait]
impl<T, C> TagService for TagServiceImpl<T, C>
where
    T: TagRepository + 'static,
    C: CertificateRepository + 'static,
{
    async fn find_all(&self, page: PageRequest) -> Result<Page<TagResponse>, ServiceError> {
        let tags = self.tag_repo.find_all(page).await.for_resource(Resource::Tag)?;
        Ok(tags.map(TagResponse::from))
    }

    async fn find_all_by_certificate(
        &self,
        certificate_id: i64,
        page: PageRequest,
    ) -> Result<Page<TagResponse>, ServiceError> {
        self.certificate_repo
            .find_by_id(certificate_id)
            .await
            .for_resource(Resource::Certificate)?
            .ok_or_else(|| ServiceError::not_found(Resource::Certificate, certificate_id))?;

        let tags = self
            .tag_repo
            .find_all_by_certificate(certificate_id, page)
            .await
            .for_resource(Resource::Tag)?;
        Ok(tags.map(TagResponse::from))
    }

    async fn find(&self, id: i64) -> Result<Option<TagResponse>, ServiceError> {
        let tag = self.tag_repo.find_by_id(id).await.for_resource(Resource::Tag)?;
        Ok(tag.map(TagResponse::from))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<TagResponse>, ServiceError> {
        let tag = self
            .tag_repo
            .find_by_name(name)
            .await
            .for_resource(Resource::Tag)?;
        Ok(tag.map(TagResponse::from))
    }

    async fn find_most_used_tag_of_top_spender(
        &self,
    ) -> Result<Option<TagResponse>, ServiceError> {
        let tag = self
            .tag_repo
            .find_most_used_tag_of_top_spender()
            .await
            .for_resource(Resource::Tag)?;
        Ok(tag.map(TagResponse::from))
    }

    async fn count(&self) -> Result<i64, ServiceError> {
        self.tag_repo.count().await.for_resource(Resource::Tag)
    }

    async fn create(&self, request: CreateTagRequest) -> Result<TagResponse, ServiceError> {
        let request = request.normalized();
        request
            .validate()
            .map_err(|e| ServiceError::from_validation(Resource::Tag, e))?;

        let name = request
            .name
            .ok_or_else(|| ServiceError::invalid(Resource::Tag, "Tag name is required"))?;

        let tag = self.tag_repo.create(&name).await.for_resource(Resource::Tag)?;

        tracing::info!(tag_id = tag.id, name = %tag.name, "Tag created");

        Ok(TagResponse::from(tag))
    }

    async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.tag_repo.delete(id).await.for_resource(Resource::Tag)?;

        tracing::info!(tag_id = id, "Tag deleted");

        Ok(())
    }
}

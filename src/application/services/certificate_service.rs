//! Certificate Service
//!
//! Handles the certificate catalog: search, creation with tag resolution,
//! full and partial updates, and deletion.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use validator::Validate;

use super::error::{RepositoryResultExt, Resource, ServiceError};
use crate::application::dto::{
    normalize_tags, CertificateItem, CertificateResponse, CreateCertificateRequest,
    PatchCertificateRequest, TagRequest, UpdateCertificateRequest,
};
use crate::domain::{
    Certificate, CertificateFilter, CertificateRepository, NewCertificate, Page, PageRequest,
    Tag, TagRepository,
};
use crate::shared::error::AppError;

/// Certificate service trait
#[async_trait]
pub trait CertificateService: Send + Sync {
    /// Search certificates by tags, text and sort order
    async fn find_all(
        &self,
        filter: CertificateFilter,
        page: PageRequest,
    ) -> Result<Page<CertificateItem>, ServiceError>;

    /// List certificates carrying a tag
    async fn find_all_by_tag(
        &self,
        tag_id: i64,
        page: PageRequest,
    ) -> Result<Page<CertificateItem>, ServiceError>;

    async fn find(&self, id: i64) -> Result<Option<CertificateResponse>, ServiceError>;

    async fn count(&self) -> Result<i64, ServiceError>;

    /// Create a certificate, creating any tags that do not exist yet
    async fn create(
        &self,
        request: CreateCertificateRequest,
    ) -> Result<CertificateResponse, ServiceError>;

    /// Replace every field of a certificate
    async fn update(
        &self,
        id: i64,
        request: UpdateCertificateRequest,
    ) -> Result<CertificateResponse, ServiceError>;

    /// Change only the fields present in the request
    async fn patch(
        &self,
        id: i64,
        request: PatchCertificateRequest,
    ) -> Result<CertificateResponse, ServiceError>;

    async fn delete(&self, id: i64) -> Result<(), ServiceError>;
}

/// Validated field values of a create or update request.
struct CertificateFields {
    name: String,
    description: String,
    price: i32,
    duration: i32,
    tags: Vec<TagRequest>,
}

impl CertificateFields {
    fn from_request(mut request: CreateCertificateRequest) -> Result<Self, ServiceError> {
        request.tags = normalize_tags(request.tags);
        request
            .validate()
            .map_err(|e| ServiceError::from_validation(Resource::Certificate, e))?;

        Ok(Self {
            name: required(request.name, "name")?,
            description: required(request.description, "description")?,
            price: required(request.price, "price")?,
            duration: required(request.duration, "duration")?,
            tags: request.tags,
        })
    }
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, ServiceError> {
    value.ok_or_else(|| {
        ServiceError::invalid(
            Resource::Certificate,
            format!("{}: Certificate {} is required", field, field),
        )
    })
}

/// CertificateService implementation
pub struct CertificateServiceImpl<C, T>
where
    C: CertificateRepository,
    T: TagRepository,
{
    certificate_repo: Arc<C>,
    tag_repo: Arc<T>,
}

impl<C, T> CertificateServiceImpl<C, T>
where
    C: CertificateRepository,
    T: TagRepository,
{
    pub fn new(certificate_repo: Arc<C>, tag_repo: Arc<T>) -> Self {
        Self {
            certificate_repo,
            tag_repo,
        }
    }

    /// Look up each requested tag by name and create the missing ones.
    ///
    /// Duplicate names collapse to one tag; the first occurrence keeps its position.
    async fn resolve_tags(&self, requested: &[TagRequest]) -> Result<Vec<Tag>, ServiceError> {
        let mut seen = HashSet::new();
        let mut tags = Vec::with_capacity(requested.len());

        for request in requested {
            let name = request.name.as_str();
            if !seen.insert(name) {
                continue;
            }

            let existing = self
                .tag_repo
                .find_by_name(name)
                .await
                .for_resource(Resource::Tag)?;

            let tag = match existing {
                Some(tag) => tag,
                None => self.create_tag(name).await?,
            };
            tags.push(tag);
        }

        Ok(tags)
    }

    async fn create_tag(&self, name: &str) -> Result<Tag, ServiceError> {
        match self.tag_repo.create(name).await {
            Ok(tag) => {
                tracing::debug!(tag_id = tag.id, name = %tag.name, "Tag created for certificate");
                Ok(tag)
            }
            // Created concurrently by another request
            Err(AppError::Conflict(message)) => self
                .tag_repo
                .find_by_name(name)
                .await
                .for_resource(Resource::Tag)?
                .ok_or_else(|| ServiceError::invalid(Resource::Tag, message)),
            Err(e) => Err(ServiceError::from_repository(Resource::Tag, e)),
        }
    }

    async fn existing(&self, id: i64) -> Result<Certificate, ServiceError> {
        self.certificate_repo
            .find_by_id(id)
            .await
            .for_resource(Resource::Certificate)?
            .ok_or_else(|| ServiceError::not_found(Resource::Certificate, id))
    }
}

#[async_trait]
impl<C, T> CertificateService for CertificateServiceImpl<C, T>
where
    C: CertificateRepository + 'static,
    T: TagRepository + 'static,
{
    async fn find_all(
        &self,
        filter: CertificateFilter,
        page: PageRequest,
    ) -> Result<Page<CertificateItem>, ServiceError> {
        let certificates = self
            .certificate_repo
            .find_all(&filter, page)
            .await
            .for_resource(Resource::Certificate)?;
        Ok(certificates.map(CertificateItem::from))
    }

    async fn find_all_by_tag(
        &self,
        tag_id: i64,
        page: PageRequest,
    ) -> Result<Page<CertificateItem>, ServiceError> {
        self.tag_repo
            .find_by_id(tag_id)
            .await
            .for_resource(Resource::Tag)?
            .ok_or_else(|| ServiceError::not_found(Resource::Tag, tag_id))?;

        let certificates = self
            .certificate_repo
            .find_all_by_tag(tag_id, page)
            .await
            .for_resource(Resource::Certificate)?;
        Ok(certificates.map(CertificateItem::from))
    }

    async fn find(&self, id: i64) -> Result<Option<CertificateResponse>, ServiceError> {
        let certificate = self
            .certificate_repo
            .find_by_id(id)
            .await
            .for_resource(Resource::Certificate)?;
        Ok(certificate.map(CertificateResponse::from))
    }

    async fn count(&self) -> Result<i64, ServiceError> {
        self.certificate_repo
            .count()
            .await
            .for_resource(Resource::Certificate)
    }

    async fn create(
        &self,
        request: CreateCertificateRequest,
    ) -> Result<CertificateResponse, ServiceError> {
        let fields = CertificateFields::from_request(request)?;
        let tags = self.resolve_tags(&fields.tags).await?;

        let certificate = self
            .certificate_repo
            .create(&NewCertificate {
                name: fields.name,
                description: fields.description,
                price: fields.price,
                duration: fields.duration,
                tags,
            })
            .await
            .for_resource(Resource::Certificate)?;

        tracing::info!(
            certificate_id = certificate.id,
            tags = certificate.tags.len(),
            "Certificate created"
        );

        Ok(CertificateResponse::from(certificate))
    }

    async fn update(
        &self,
        id: i64,
        request: UpdateCertificateRequest,
    ) -> Result<CertificateResponse, ServiceError> {
        let fields = CertificateFields::from_request(request)?;
        let current = self.existing(id).await?;
        let tags = self.resolve_tags(&fields.tags).await?;

        let certificate = self
            .certificate_repo
            .update(&Certificate {
                id,
                name: fields.name,
                description: fields.description,
                price: fields.price,
                duration: fields.duration,
                create_date: current.create_date,
                last_update_date: Utc::now(),
                tags,
            })
            .await
            .for_resource(Resource::Certificate)?;

        tracing::info!(certificate_id = id, "Certificate replaced");

        Ok(CertificateResponse::from(certificate))
    }

    async fn patch(
        &self,
        id: i64,
        mut request: PatchCertificateRequest,
    ) -> Result<CertificateResponse, ServiceError> {
        request.tags = request.tags.map(normalize_tags);
        request
            .validate()
            .map_err(|e| ServiceError::from_validation(Resource::Certificate, e))?;

        let mut certificate = self.existing(id).await?;

        if let Some(name) = request.name {
            certificate.name = name;
        }
        if let Some(description) = request.description {
            certificate.description = description;
        }
        if let Some(price) = request.price {
            certificate.price = price;
        }
        if let Some(duration) = request.duration {
            certificate.duration = duration;
        }
        if let Some(tags) = request.tags {
            certificate.tags = self.resolve_tags(&tags).await?;
        }
        certificate.last_update_date = Utc::now();

        let certificate = self
            .certificate_repo
            .update(&certificate)
            .await
            .for_resource(Resource::Certificate)?;

        tracing::info!(certificate_id = id, "Certificate patched");

        Ok(CertificateResponse::from(certificate))
    }

    async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.certificate_repo
            .delete(id)
            .await
            .for_resource(Resource::Certificate)?;

        tracing::info!(certificate_id = id, "Certificate deleted");

        Ok(())
    }
}

//! Certificate Handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::application::dto::{
    CertificateItem, CertificateQueryParams, CertificateResponse, CreateCertificateRequest,
    PageParams, PatchCertificateRequest, TagResponse, UpdateCertificateRequest, UserOrderItem,
};
use crate::application::services::{Resource, ServiceError};
use crate::domain::{CertificateFilter, CertificateSort};
use crate::presentation::http::extractors::{AdminUser, ApiPath, ApiQuery, ValidatedJson};
use crate::presentation::http::hateoas::{EntityModel, LinkBuilder, PagedModel};
use crate::shared::error::AppError;
use crate::startup::AppState;

impl CertificateQueryParams {
    /// Turn raw query parameters into a filter. Unknown sort fields are a bad request.
    pub fn to_filter(&self) -> Result<CertificateFilter, AppError> {
        let tag_names = self
            .tags
            .as_deref()
            .map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);

        let sort = match self.sort.as_deref() {
            Some(sort) => sort
                .parse::<CertificateSort>()
                .map_err(|e| AppError::BadRequest(e.to_string()))?,
            None => CertificateSort::default(),
        };

        Ok(CertificateFilter {
            tag_names,
            search,
            sort,
        })
    }

    /// Parameters repeated on page navigation links.
    fn link_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(tags) = &self.tags {
            query.push(("tags", tags.clone()));
        }
        if let Some(search) = &self.search {
            query.push(("search", search.clone()));
        }
        if let Some(sort) = &self.sort {
            query.push(("sort", sort.clone()));
        }
        query
    }
}

/// Search certificates
pub async fn list_certificates(
    State(state): State<AppState>,
    ApiQuery(filter_params): ApiQuery<CertificateQueryParams>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<Json<PagedModel<CertificateItem>>, AppError> {
    let filter = filter_params.to_filter()?;
    let page = params.page_request().map_err(ServiceError::from)?;

    let certificates = state.certificate_service.find_all(filter, page).await?;

    Ok(Json(state.links.paged(
        certificates,
        "certificates",
        "/certificates",
        &filter_params.link_query(),
        LinkBuilder::certificate_item,
    )))
}

/// Get a certificate by id
pub async fn get_certificate(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<EntityModel<CertificateResponse>>, AppError> {
    let certificate = state
        .certificate_service
        .find(id)
        .await?
        .ok_or_else(|| ServiceError::not_found(Resource::Certificate, id))?;

    Ok(Json(state.links.certificate(certificate)))
}

/// List the tags of a certificate
pub async fn certificate_tags(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<Json<PagedModel<TagResponse>>, AppError> {
    let page = params.page_request().map_err(ServiceError::from)?;
    let tags = state.tag_service.find_all_by_certificate(id, page).await?;

    Ok(Json(state.links.paged(
        tags,
        "tags",
        &format!("/certificates/{}/tags", id),
        &[],
        LinkBuilder::tag,
    )))
}

/// List the orders placed for a certificate
pub async fn certificate_orders(
    _admin: AdminUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<Json<PagedModel<UserOrderItem>>, AppError> {
    let page = params.page_request().map_err(ServiceError::from)?;
    let orders = state
        .order_service
        .find_all_by_certificate_id(id, page)
        .await?;

    Ok(Json(state.links.paged(
        orders,
        "orders",
        &format!("/certificates/{}/orders", id),
        &[],
        LinkBuilder::order_item,
    )))
}

/// Create a certificate
pub async fn create_certificate(
    _admin: AdminUser,
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateCertificateRequest>,
) -> Result<(StatusCode, Json<EntityModel<CertificateResponse>>), AppError> {
    let certificate = state.certificate_service.create(body).await?;
    Ok((StatusCode::CREATED, Json(state.links.certificate(certificate))))
}

/// Replace a certificate
pub async fn update_certificate(
    _admin: AdminUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(body): ValidatedJson<UpdateCertificateRequest>,
) -> Result<Json<EntityModel<CertificateResponse>>, AppError> {
    let certificate = state.certificate_service.update(id, body).await?;
    Ok(Json(state.links.certificate(certificate)))
}

/// Partially update a certificate
pub async fn patch_certificate(
    _admin: AdminUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(body): ValidatedJson<PatchCertificateRequest>,
) -> Result<Json<EntityModel<CertificateResponse>>, AppError> {
    let certificate = state.certificate_service.patch(id, body).await?;
    Ok(Json(state.links.certificate(certificate)))
}

/// Delete a certificate
pub async fn delete_certificate(
    _admin: AdminUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, AppError> {
    state.certificate_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

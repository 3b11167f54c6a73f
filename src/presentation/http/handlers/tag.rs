//! Tag Handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::application::dto::{CertificateItem, CreateTagRequest, PageParams, TagResponse};
use crate::application::services::{Resource, ServiceError};
use crate::presentation::http::extractors::{AdminUser, ApiPath, ApiQuery, ValidatedJson};
use crate::presentation::http::hateoas::{EntityModel, LinkBuilder, PagedModel};
use crate::shared::error::{AppError, ErrorCode};
use crate::startup::AppState;

/// List all tags
pub async fn list_tags(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<Json<PagedModel<TagResponse>>, AppError> {
    let page = params.page_request().map_err(ServiceError::from)?;
    let tags = state.tag_service.find_all(page).await?;

    Ok(Json(state.links.paged(tags, "tags", "/tags", &[], LinkBuilder::tag)))
}

/// Get a tag by id
pub async fn get_tag(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<EntityModel<TagResponse>>, AppError> {
    let tag = state
        .tag_service
        .find(id)
        .await?
        .ok_or_else(|| ServiceError::not_found(Resource::Tag, id))?;

    Ok(Json(state.links.tag(tag)))
}

/// Most used tag of the user with the highest order total
pub async fn most_used_tag(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<EntityModel<TagResponse>>, AppError> {
    let tag = state
        .tag_service
        .find_most_used_tag_of_top_spender()
        .await?
        .ok_or_else(|| ServiceError::EntityNotFound {
            code: ErrorCode::TagNotFound,
            message: "No tagged certificates have been ordered yet".into(),
        })?;

    Ok(Json(state.links.tag(tag)))
}

/// List the certificates carrying a tag
pub async fn tag_certificates(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<Json<PagedModel<CertificateItem>>, AppError> {
    let page = params.page_request().map_err(ServiceError::from)?;
    let certificates = state.certificate_service.find_all_by_tag(id, page).await?;

    Ok(Json(state.links.paged(
        certificates,
        "certificates",
        &format!("/tags/{}/certificates", id),
        &[],
        LinkBuilder::certificate_item,
    )))
}

/// Create a tag
pub async fn create_tag(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateTagRequest>,
) -> Result<(StatusCode, Json<EntityModel<TagResponse>>), AppError> {
    let tag = state.tag_service.create(body).await?;

    tracing::debug!(admin_id = admin.user_id, tag_id = tag.id, "Tag created via API");

    Ok((StatusCode::CREATED, Json(state.links.tag(tag))))
}

/// Delete a tag and its certificate links
pub async fn delete_tag(
    _admin: AdminUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, AppError> {
    state.tag_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! User Handlers

use axum::{extract::State, Json};

use crate::application::dto::{PageParams, UserOrderItem, UserResponse};
use crate::application::services::{Resource, ServiceError};
use crate::presentation::http::extractors::{AdminUser, ApiPath, ApiQuery, AuthUser};
use crate::presentation::http::hateoas::{EntityModel, LinkBuilder, PagedModel};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// List all users
pub async fn list_users(
    _admin: AdminUser,
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<Json<PagedModel<UserResponse>>, AppError> {
    let page = params.page_request().map_err(ServiceError::from)?;
    let users = state.user_service.find_all(page).await?;

    Ok(Json(state.links.paged(users, "users", "/users", &[], LinkBuilder::user)))
}

/// Get a user by id
pub async fn get_user(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<EntityModel<UserResponse>>, AppError> {
    auth.require_owner_or_admin(id)?;

    let user = state
        .user_service
        .find(id)
        .await?
        .ok_or_else(|| ServiceError::not_found(Resource::User, id))?;

    Ok(Json(state.links.user(user)))
}

/// List the orders placed by a user
pub async fn user_orders(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<Json<PagedModel<UserOrderItem>>, AppError> {
    auth.require_owner_or_admin(id)?;

    let page = params.page_request().map_err(ServiceError::from)?;
    let orders = state.order_service.find_all_by_user_id(id, page).await?;

    Ok(Json(state.links.paged(
        orders,
        "orders",
        &format!("/users/{}/orders", id),
        &[],
        LinkBuilder::order_item,
    )))
}

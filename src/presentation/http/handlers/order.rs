//! Order Handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::application::dto::{
    CreateOrderParams, CreateUserOrderRequest, PageParams, UserOrderItem, UserOrderResponse,
};
use crate::application::services::{Resource, ServiceError};
use crate::infrastructure::metrics;
use crate::presentation::http::extractors::{AdminUser, ApiPath, ApiQuery, AuthUser};
use crate::presentation::http::hateoas::{EntityModel, LinkBuilder, PagedModel};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// List all orders
pub async fn list_orders(
    _admin: AdminUser,
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<Json<PagedModel<UserOrderItem>>, AppError> {
    let page = params.page_request().map_err(ServiceError::from)?;
    let orders = state.order_service.find_all(page).await?;

    Ok(Json(state.links.paged(
        orders,
        "orders",
        "/orders",
        &[],
        LinkBuilder::order_item,
    )))
}

/// Get an order. Only its owner and admins may read it.
pub async fn get_order(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<EntityModel<UserOrderResponse>>, AppError> {
    let order = state
        .order_service
        .find(id)
        .await?
        .ok_or_else(|| ServiceError::not_found(Resource::UserOrder, id))?;

    auth.require_owner_or_admin(order.user_id)?;

    Ok(Json(state.links.order(order)))
}

/// Buy a certificate for the caller
pub async fn create_order(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<CreateOrderParams>,
) -> Result<(StatusCode, Json<EntityModel<UserOrderResponse>>), AppError> {
    let request = CreateUserOrderRequest::new(auth.user_id, params.certificate_id);
    let order = state.order_service.create(request).await?;

    tracing::info!(
        order_id = order.id,
        user_id = order.user_id,
        certificate_id = order.certificate_id,
        cost = order.cost,
        "Order placed"
    );
    metrics::record_order_placed(order.cost);

    Ok((StatusCode::CREATED, Json(state.links.order(order))))
}

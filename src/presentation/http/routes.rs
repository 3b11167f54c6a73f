//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    http::header,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::track_metrics;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/tags", tag_routes())
        .nest("/certificates", certificate_routes())
        .nest("/orders", order_routes())
        .nest("/users", user_routes())
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .route_layer(middleware::from_fn(track_metrics))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> Result<impl IntoResponse, AppError> {
    let body = metrics::gather_metrics().map_err(|e| AppError::Internal(e.to_string()))?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    ))
}

/// Public authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
}

fn tag_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::tag::list_tags).post(handlers::tag::create_tag),
        )
        .route("/most-used", get(handlers::tag::most_used_tag))
        .route(
            "/{id}",
            get(handlers::tag::get_tag).delete(handlers::tag::delete_tag),
        )
        .route("/{id}/certificates", get(handlers::tag::tag_certificates))
}

fn certificate_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::certificate::list_certificates)
                .post(handlers::certificate::create_certificate),
        )
        .route(
            "/{id}",
            get(handlers::certificate::get_certificate)
                .put(handlers::certificate::update_certificate)
                .patch(handlers::certificate::patch_certificate)
                .delete(handlers::certificate::delete_certificate),
        )
        .route("/{id}/tags", get(handlers::certificate::certificate_tags))
        .route(
            "/{id}/orders",
            get(handlers::certificate::certificate_orders),
        )
}

fn order_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::order::list_orders).post(handlers::order::create_order),
        )
        .route("/{id}", get(handlers::order::get_order))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::user::list_users))
        .route("/{id}", get(handlers::user::get_user))
        .route("/{id}/orders", get(handlers::user::user_orders))
}

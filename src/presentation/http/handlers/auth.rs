//! Authentication Handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::application::dto::{LoginRequest, RegisterRequest, RegisterResponse, TokenResponse};
use crate::infrastructure::metrics;
use crate::presentation::http::extractors::ValidatedJson;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let (user, token) = state.auth_service.register(body).await?;

    Ok((StatusCode::CREATED, Json(RegisterResponse { user, token })))
}

/// Login with credentials
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let result = state.auth_service.authenticate(body).await;
    metrics::record_login(result.is_ok());

    Ok(Json(result?))
}

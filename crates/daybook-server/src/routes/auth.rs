//! Authentication endpoints: register, login, refresh, logout.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use daybook_auth::TokenPair;
use daybook_core::models::user::PublicUser;
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::{self, LoginRequest, RefreshRequest, RegisterRequest};

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub user: PublicUser,
    pub tokens: TokenPair,
}

#[derive(Debug, Serialize)]
pub struct TokensResponse {
    pub success: bool,
    pub message: String,
    pub tokens: TokenPair,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// `POST /api/auth/register`
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let input =
        validation::validate_register(body).map_err(|details| ApiError::Validation { details })?;

    let output = state.auth.register(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            message: "User registered successfully".into(),
            user: output.user.public(),
            tokens: output.tokens,
        }),
    ))
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let input =
        validation::validate_login(body).map_err(|details| ApiError::Validation { details })?;

    let output = state.auth.login(input).await?;

    Ok(Json(AuthResponse {
        success: true,
        message: "Login successful".into(),
        user: output.user.public(),
        tokens: output.tokens,
    }))
}

/// `POST /api/auth/refresh`
pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> Result<Json<TokensResponse>, ApiError> {
    let refresh_token =
        validation::validate_refresh(body).map_err(|details| ApiError::Validation { details })?;

    let tokens = state.auth.refresh(&refresh_token).await?;

    Ok(Json(TokensResponse {
        success: true,
        message: "Tokens refreshed successfully".into(),
        tokens,
    }))
}

/// `POST /api/auth/logout`
///
/// Stateless: nothing is invalidated server-side, tokens stay valid
/// until their natural expiry. The client discards its copies.
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse {
        success: true,
        message: "Logout successful".into(),
    })
}

//! Authentication request handlers.

use axum::extract::State;
use axum::{Extension, Json};

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{
    AuthUser, LoginRequest, LogoutResponse, RefreshRequest, RefreshResponse, RegisterRequest,
    TokenResponse,
};
use crate::services::auth;

/// `POST /auth/login`: authenticate with username or email + password.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let resp = auth::login(state.users.as_ref(), &state.jwt, &body).await?;
    Ok(Json(resp))
}

/// `POST /auth/register`: create a new member account.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> AppResult<Json<TokenResponse>> {
    let resp = auth::register(state.users.as_ref(), &state.jwt, &body).await?;
    Ok(Json(resp))
}

/// `POST /auth/refresh`: exchange a refresh token for a new access token.
pub async fn refresh_handler(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> AppResult<Json<RefreshResponse>> {
    let resp = auth::refresh(state.users.as_ref(), &state.jwt, &body.refresh_token).await?;
    Ok(Json(resp))
}

/// `POST /auth/logout`: acknowledgment only; the client discards its tokens.
pub async fn logout_handler() -> Json<LogoutResponse> {
    Json(auth::logout())
}

/// `GET /auth/me`: profile of the bearer.
pub async fn me_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> AppResult<Json<AuthUser>> {
    let resp = auth::me(state.users.as_ref(), &user.0).await?;
    Ok(Json(resp))
}

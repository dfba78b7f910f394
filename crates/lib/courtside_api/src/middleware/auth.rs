//! Authentication middleware: Bearer token extraction and JWT verification.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use courtside_core::auth::jwt::JwtKeys;
use courtside_core::models::auth::Identity;
use thiserror::Error;
use tracing::debug;

use crate::AppState;
use crate::error::AppError;

/// Key used to store the verified identity in request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Identity);

/// Why a request failed the gate. Logged, never sent to the client.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthRejection {
    #[error("missing authorization header")]
    MissingHeader,

    #[error("authorization header is not a bearer token")]
    InvalidScheme,

    #[error("invalid or expired token")]
    InvalidToken,
}

/// Extract and verify the bearer token in `headers`.
pub fn authorize(headers: &HeaderMap, jwt: &JwtKeys) -> Result<Identity, AuthRejection> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthRejection::MissingHeader)?
        .to_str()
        .map_err(|_| AuthRejection::InvalidScheme)?;

    let token = header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthRejection::InvalidScheme)?;

    jwt.verify_access(token).ok_or(AuthRejection::InvalidToken)
}

/// Axum middleware: extracts `Authorization: Bearer <token>`, verifies the JWT,
/// and injects `AuthenticatedUser` into request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = authorize(request.headers(), &state.jwt).map_err(|reason| {
        debug!(%reason, path = %request.uri().path(), "request rejected");
        AppError::Unauthorized("Unauthorized".into())
    })?;

    request.extensions_mut().insert(AuthenticatedUser(identity));

    Ok(next.run(request).await)
}

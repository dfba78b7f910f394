//! Authentication and authorization logic.
//!
//! Provides password hashing, JWT issuance and verification, signing secret
//! resolution, the club-account policy and the user queries shared by
//! `courtside_api`.

pub mod jwt;
pub mod password;
pub mod policy;
pub mod queries;
pub mod secret;

use thiserror::Error;

use crate::store::StoreError;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    CredentialError,

    #[error("Token error: {0}")]
    TokenError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("JWT signing secret is not configured (set JWT_SECRET or AUTH_SECRET)")]
    MissingSecret,

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict(msg) => AuthError::ValidationError(msg),
            StoreError::Db(e) => AuthError::DbError(e),
        }
    }
}

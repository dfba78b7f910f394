//! Authentication domain models.
//!
//! These are internal domain models, distinct from the API request/response
//! types in `courtside_api::models` (which are camelCase on the wire).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A club member or club account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    /// Club accounts may modify shared staff and inventory records.
    pub is_club_account: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The subset of the record that gets embedded in tokens.
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            email: self.email.clone(),
            username: self.username.clone(),
        }
    }
}

/// User with password hash (for internal auth flows).
#[derive(Debug, Clone)]
pub struct UserWithPassword {
    pub user: User,
    pub password_hash: Option<String>,
}

/// Fields needed to create a user. The password is already hashed.
///
/// There is no club-account field: the store flags the first user it ever
/// inserts and nobody else.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
}

/// Authenticated identity recovered from a verified token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
    pub username: String,
}

/// Distinguishes the two token variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Short-lived, authorizes individual API calls.
    Access,
    /// Long-lived, only mints new access tokens.
    Refresh,
}

/// JWT claims embedded in both access and refresh tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: user ID (standard JWT `sub` claim).
    pub sub: String,
    pub email: String,
    pub username: String,
    #[serde(rename = "typ")]
    pub kind: TokenKind,
    /// Expiry (unix timestamp).
    pub exp: i64,
    /// Issued at (unix timestamp).
    pub iat: i64,
}

impl TokenClaims {
    /// Recover the identity, or `None` if `sub` is not a UUID.
    pub fn identity(&self) -> Option<Identity> {
        let id = Uuid::parse_str(&self.sub).ok()?;
        Some(Identity {
            id,
            email: self.email.clone(),
            username: self.username.clone(),
        })
    }
}

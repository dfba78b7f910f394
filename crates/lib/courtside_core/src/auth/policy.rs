//! Club-account policy.
//!
//! Shared staff and inventory records may only be modified by identities
//! flagged as club accounts. Every mutating operation calls
//! [`require_club_account`], which re-reads the record so that a revoked
//! flag takes effect immediately rather than when the token expires.

use tracing::warn;

use super::AuthError;
use crate::models::auth::{Identity, User};
use crate::store::UserStore;

/// Load the caller's record and ensure it is a club account.
pub async fn require_club_account(
    users: &dyn UserStore,
    identity: &Identity,
) -> Result<User, AuthError> {
    let user = users.find_by_id(identity.id).await?.ok_or_else(|| {
        warn!(user_id = %identity.id, "mutation by identity with no user record");
        AuthError::Forbidden("Account no longer exists".into())
    })?;
    ensure_club_account(&user)?;
    Ok(user)
}

/// Pure check on an already-loaded record.
pub fn ensure_club_account(user: &User) -> Result<(), AuthError> {
    if user.is_club_account {
        Ok(())
    } else {
        warn!(user_id = %user.id, username = %user.username, "club account required");
        Err(AuthError::Forbidden(
            "Only club accounts may modify club records".into(),
        ))
    }
}

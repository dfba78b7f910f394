//! Password hashing via bcrypt.

use std::sync::LazyLock;

use super::AuthError;

/// bcrypt cost factor.
const BCRYPT_COST: u32 = 10;

/// Hash a password with bcrypt (cost 10). The salt is generated per call.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    bcrypt::hash(password, BCRYPT_COST)
        .map_err(|e| AuthError::Internal(format!("bcrypt hash: {e}")))
}

/// Verify a password against a bcrypt hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    bcrypt::verify(password, hash).map_err(|e| AuthError::Internal(format!("bcrypt verify: {e}")))
}

/// Compared against when there is no real hash, so every login attempt pays
/// one bcrypt check.
static DUMMY_HASH: LazyLock<Result<String, AuthError>> =
    LazyLock::new(|| hash_password("courtside:no-such-account:7f3c9a1e"));

/// Run a full bcrypt comparison against a fixed hash and discard the outcome.
pub fn verify_against_dummy(password: &str) -> Result<(), AuthError> {
    match DUMMY_HASH.as_ref() {
        Ok(hash) => verify_password(password, hash).map(drop),
        Err(e) => Err(AuthError::Internal(e.to_string())),
    }
}

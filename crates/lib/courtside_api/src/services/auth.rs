//! Authentication service: login, registration and refresh flows on top of
//! `courtside_core::auth`.

use chrono::Utc;
use courtside_core::auth::jwt::{
    ACCESS_TOKEN_EXPIRY_SECS, JwtKeys, REFRESH_TOKEN_EXPIRY_SECS, TokenPair,
};
use courtside_core::auth::password::{hash_password, verify_against_dummy, verify_password};
use courtside_core::models::auth::{Identity, NewUser, TokenKind, User};
use courtside_core::store::UserStore;
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::models::{
    AuthUser, LoginRequest, LogoutResponse, RefreshResponse, RegisterRequest, TokenResponse,
};

/// Minimum password length accepted at registration.
const MIN_PASSWORD_LEN: usize = 8;

const TOKEN_TYPE: &str = "Bearer";

/// The one message every failed login gets, whatever the cause.
fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid credentials".into())
}

fn build_token_response(user: &User, pair: TokenPair) -> TokenResponse {
    TokenResponse {
        access_token: pair.access.token,
        refresh_token: pair.refresh.token,
        expires_in: ACCESS_TOKEN_EXPIRY_SECS,
        refresh_expires_in: REFRESH_TOKEN_EXPIRY_SECS,
        token_type: TOKEN_TYPE.to_string(),
        user: AuthUser::from(user),
    }
}

/// Spend the same bcrypt work as a real comparison so that a missing
/// account cannot be told apart by response time.
fn burn_password_check(password: &str) {
    if let Err(e) = verify_against_dummy(password) {
        warn!(error = %e, "dummy password check failed");
    }
}

/// Authenticate with username or email + password.
///
/// Unknown user, missing hash and wrong password are indistinguishable to the
/// caller, in body and in timing; the log line records which one it was.
pub async fn login(
    users: &dyn UserStore,
    jwt: &JwtKeys,
    req: &LoginRequest,
) -> AppResult<TokenResponse> {
    let login = req.username_or_email.trim();
    if login.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "usernameOrEmail and password are required".into(),
        ));
    }

    let Some(record) = users.find_by_login(login).await? else {
        burn_password_check(&req.password);
        warn!(login, reason = "unknown user", "login failed");
        return Err(invalid_credentials());
    };

    let Some(pw_hash) = record.password_hash.as_deref() else {
        burn_password_check(&req.password);
        warn!(user_id = %record.user.id, reason = "no password set", "login failed");
        return Err(invalid_credentials());
    };

    match verify_password(&req.password, pw_hash) {
        Ok(true) => {}
        Ok(false) => {
            warn!(user_id = %record.user.id, reason = "wrong password", "login failed");
            return Err(invalid_credentials());
        }
        Err(e) => {
            warn!(
                user_id = %record.user.id,
                reason = "unreadable password hash",
                error = %e,
                "login failed"
            );
            return Err(invalid_credentials());
        }
    }

    let pair = jwt.issue(&record.user.identity())?;
    info!(user_id = %record.user.id, "login succeeded");
    Ok(build_token_response(&record.user, pair))
}

/// Check registration fields, returning the first problem found.
fn validate_registration(req: &RegisterRequest) -> AppResult<()> {
    let username = req.username.trim();
    if username.is_empty() || req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "username, email and password are required".into(),
        ));
    }
    if !(3..=32).contains(&username.len())
        || !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        return Err(AppError::Validation(
            "Username must be 3-32 characters of letters, digits, '_', '.' or '-'".into(),
        ));
    }
    let email = req.email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
        _ => return Err(AppError::Validation("Email address is invalid".into())),
    }
    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

/// Register a new member. The store flags the first account it ever creates
/// as the club account.
pub async fn register(
    users: &dyn UserStore,
    jwt: &JwtKeys,
    req: &RegisterRequest,
) -> AppResult<TokenResponse> {
    validate_registration(req)?;

    let user = users
        .create_user(NewUser {
            username: req.username.trim().to_string(),
            email: req.email.trim().to_lowercase(),
            password_hash: hash_password(&req.password)?,
            full_name: req
                .full_name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
        })
        .await?;

    if user.is_club_account {
        info!(username = %user.username, "first user registered as club account");
    }

    let pair = jwt.issue(&user.identity())?;
    Ok(build_token_response(&user, pair))
}

/// Exchange a refresh token for a new access token.
///
/// The refresh token itself is returned unchanged, so the session still ends
/// seven days after login.
pub async fn refresh(
    users: &dyn UserStore,
    jwt: &JwtKeys,
    refresh_token: &str,
) -> AppResult<RefreshResponse> {
    let now = Utc::now();
    let Some((identity, refresh_exp)) = jwt
        .verify_claims_at(refresh_token, TokenKind::Refresh, now)
        .and_then(|claims| Some((claims.identity()?, claims.exp)))
    else {
        warn!("refresh rejected: invalid or expired refresh token");
        return Err(AppError::Unauthorized("Invalid refresh token".into()));
    };

    // Re-read so renamed users get current claims and deleted users get nothing.
    let Some(user) = users.find_by_id(identity.id).await? else {
        warn!(user_id = %identity.id, "refresh rejected: user no longer exists");
        return Err(AppError::Unauthorized("Invalid refresh token".into()));
    };

    let access = jwt.issue_access_at(&user.identity(), now)?;

    Ok(RefreshResponse {
        access_token: access.token,
        refresh_token: refresh_token.to_string(),
        expires_in: ACCESS_TOKEN_EXPIRY_SECS,
        refresh_expires_in: refresh_exp - now.timestamp(),
        token_type: TOKEN_TYPE.to_string(),
    })
}

/// Logout: tokens are self-contained, so this only acknowledges.
pub fn logout() -> LogoutResponse {
    LogoutResponse { success: true }
}

/// Current profile of the authenticated identity.
pub async fn me(users: &dyn UserStore, identity: &Identity) -> AppResult<AuthUser> {
    let user = users
        .find_by_id(identity.id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Unauthorized".into()))?;
    Ok(AuthUser::from(&user))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(username: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            full_name: None,
        }
    }

    #[test]
    fn registration_validation() {
        assert!(validate_registration(&req("alice", "alice@club.test", "baseline1")).is_ok());
        assert!(validate_registration(&req("", "alice@club.test", "baseline1")).is_err());
        assert!(validate_registration(&req("al", "alice@club.test", "baseline1")).is_err());
        assert!(validate_registration(&req("al ice", "alice@club.test", "baseline1")).is_err());
        assert!(validate_registration(&req("alice", "alice.club.test", "baseline1")).is_err());
        assert!(validate_registration(&req("alice", "@club.test", "baseline1")).is_err());
        assert!(validate_registration(&req("alice", "alice@club.test", "short")).is_err());
    }
}

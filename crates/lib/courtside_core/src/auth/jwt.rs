//! JWT token issuance and verification.
//!
//! Both variants are HS256-signed and self-contained. Verification never
//! fails loudly: malformed, tampered, expired and wrong-variant tokens all
//! come back as `None`.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;

use super::AuthError;
use crate::models::auth::{Identity, TokenClaims, TokenKind};

/// Access token lifetime: 15 minutes.
pub const ACCESS_TOKEN_EXPIRY_SECS: i64 = 15 * 60;

/// Refresh token lifetime: 7 days.
pub const REFRESH_TOKEN_EXPIRY_SECS: i64 = 7 * 24 * 60 * 60;

/// Signing and verification keys derived from the server secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

/// A single signed token and when it stops being valid.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Access + refresh tokens minted together at login.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: IssuedToken,
    pub refresh: IssuedToken,
}

impl JwtKeys {
    /// Create keys from the raw signing secret.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    /// Mint an access/refresh pair for `identity`, valid from now.
    pub fn issue(&self, identity: &Identity) -> Result<TokenPair, AuthError> {
        self.issue_at(identity, Utc::now())
    }

    /// Mint an access/refresh pair as if the current time were `now`.
    pub fn issue_at(
        &self,
        identity: &Identity,
        now: DateTime<Utc>,
    ) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            access: self.sign(identity, TokenKind::Access, now)?,
            refresh: self.sign(identity, TokenKind::Refresh, now)?,
        })
    }

    /// Mint only an access token (used by the refresh flow).
    pub fn issue_access_at(
        &self,
        identity: &Identity,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthError> {
        self.sign(identity, TokenKind::Access, now)
    }

    /// Verify an access token against the current time.
    pub fn verify_access(&self, token: &str) -> Option<Identity> {
        self.verify_access_at(token, Utc::now())
    }

    /// Verify an access token against `now`.
    pub fn verify_access_at(&self, token: &str, now: DateTime<Utc>) -> Option<Identity> {
        self.verify_at(token, TokenKind::Access, now)
    }

    /// Verify a refresh token against the current time.
    pub fn verify_refresh(&self, token: &str) -> Option<Identity> {
        self.verify_refresh_at(token, Utc::now())
    }

    /// Verify a refresh token against `now`.
    pub fn verify_refresh_at(&self, token: &str, now: DateTime<Utc>) -> Option<Identity> {
        self.verify_at(token, TokenKind::Refresh, now)
    }

    fn sign(
        &self,
        identity: &Identity,
        kind: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthError> {
        let expires_at = now + Duration::seconds(lifetime_secs(kind));
        let claims = TokenClaims {
            sub: identity.id.to_string(),
            email: identity.email.clone(),
            username: identity.username.clone(),
            kind,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenError(format!("jwt encode: {e}")))?;
        Ok(IssuedToken { token, expires_at })
    }

    fn verify_at(&self, token: &str, kind: TokenKind, now: DateTime<Utc>) -> Option<Identity> {
        self.verify_claims_at(token, kind, now)?.identity()
    }

    /// Full claims of a valid token of the given variant, checked against `now`.
    pub fn verify_claims_at(
        &self,
        token: &str,
        kind: TokenKind,
        now: DateTime<Utc>,
    ) -> Option<TokenClaims> {
        // Expiry is checked below against the caller's clock, not the library's.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        let claims = match decode::<TokenClaims>(token, &self.decoding_key, &validation) {
            Ok(data) => data.claims,
            Err(e) => {
                debug!(error = %e, "token rejected");
                return None;
            }
        };
        if claims.kind != kind {
            debug!(expected = ?kind, actual = ?claims.kind, "token rejected: wrong type");
            return None;
        }
        if now.timestamp() >= claims.exp {
            debug!(exp = claims.exp, "token rejected: expired");
            return None;
        }
        Some(claims)
    }
}

/// Lifetime in seconds for a token variant.
pub fn lifetime_secs(kind: TokenKind) -> i64 {
    match kind {
        TokenKind::Access => ACCESS_TOKEN_EXPIRY_SECS,
        TokenKind::Refresh => REFRESH_TOKEN_EXPIRY_SECS,
    }
}

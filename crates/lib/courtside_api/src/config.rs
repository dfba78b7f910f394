//! API server configuration.

use std::fmt;

use courtside_core::auth::AuthError;
use courtside_core::auth::secret::resolve_jwt_secret;

/// Configuration for the API server.
#[derive(Clone)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3100").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// JWT signing secret.
    pub jwt_secret: String,
}

impl ApiConfig {
    /// Reads configuration from environment variables.
    ///
    /// | Variable                     | Default                               |
    /// |------------------------------|---------------------------------------|
    /// | `BIND_ADDR`                  | `127.0.0.1:3100`                      |
    /// | `DATABASE_URL`               | `postgres://localhost:5432/courtside` |
    /// | `JWT_SECRET` / `AUTH_SECRET` | none: startup fails without one      |
    pub fn from_env() -> Result<Self, AuthError> {
        Ok(Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3100".into()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/courtside".into()),
            jwt_secret: resolve_jwt_secret()?,
        })
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &self.database_url)
            .field("jwt_secret", &"<redacted>")
            .finish()
    }
}

//! Calls to the unauthenticated `/auth/*` endpoints.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::error::{ClientError, check, decode};
use crate::models::{LoginRequest, LoginResponse, RefreshRequest, RefreshResponse};

/// Per-request timeout for the HTTP transport.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The network side of the token manager.
#[async_trait]
pub trait AuthTransport: Send + Sync {
    async fn login(
        &self,
        username_or_email: &str,
        password: &str,
    ) -> Result<LoginResponse, ClientError>;

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse, ClientError>;

    async fn logout(&self) -> Result<(), ClientError>;
}

/// `AuthTransport` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(base_url: Url) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Reuse an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url: with_trailing_slash(base_url),
        }
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }
}

/// `Url::join` replaces the last segment unless the base ends in `/`.
pub(crate) fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[async_trait]
impl AuthTransport for HttpTransport {
    async fn login(
        &self,
        username_or_email: &str,
        password: &str,
    ) -> Result<LoginResponse, ClientError> {
        let resp = self
            .http
            .post(self.url("/auth/login")?)
            .json(&LoginRequest {
                username_or_email,
                password,
            })
            .send()
            .await?;
        decode(resp).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse, ClientError> {
        let resp = self
            .http
            .post(self.url("/auth/refresh")?)
            .json(&RefreshRequest { refresh_token })
            .send()
            .await?;
        decode(resp).await
    }

    async fn logout(&self) -> Result<(), ClientError> {
        let resp = self
            .http
            .post(self.url("/auth/logout")?)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_under_base_path() {
        let t = HttpTransport::with_client(
            reqwest::Client::new(),
            Url::parse("https://club.example/courtside").unwrap(),
        );
        assert_eq!(
            t.url("/auth/login").unwrap().as_str(),
            "https://club.example/courtside/auth/login"
        );
    }
}

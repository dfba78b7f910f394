//! Client error types.

use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Token storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid server response: {0}")]
    InvalidResponse(String),

    #[error("Not signed in")]
    NoSession,
}

/// Server error body (`{error, message}`).
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Decode a JSON success body, or turn a non-2xx response into an error.
pub(crate) async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let resp = check(resp).await?;
    Ok(resp.json::<T>().await?)
}

/// Pass 2xx responses through; map the rest to `ClientError`.
pub(crate) async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = match resp.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => status.canonical_reason().unwrap_or("error").to_string(),
    };
    Err(match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
        StatusCode::FORBIDDEN => ClientError::Forbidden(message),
        _ => ClientError::Api {
            status: status.as_u16(),
            message,
        },
    })
}

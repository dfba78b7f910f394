//! # courtside_api_client
//!
//! Typed HTTP client for the Courtside API, plus the client-side token
//! manager that owns the stored token bundle.
//!
//! Every protected call obtains its bearer header from
//! [`TokenManager::auth_header`], which refreshes the access token
//! when it has expired and signs out when refreshing is no longer possible.

pub mod client;
pub mod clock;
pub mod error;
pub mod manager;
pub mod models;
pub mod storage;
pub mod transport;

pub use client::CourtsideClient;
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::ClientError;
pub use manager::{INACTIVITY_TIMEOUT_SECS, LogoutReason, SessionEvent, TokenManager};
pub use models::{SessionState, TokenBundle};
pub use storage::{FileTokenStorage, MemoryTokenStorage, StoredSession, TokenStorage};
pub use transport::{AuthTransport, HttpTransport};

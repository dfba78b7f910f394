//! Client-side token manager.
//!
//! Session state is derived lazily from the stored bundle and the clock on
//! every call; there are no background timers. All reads and writes of the
//! stored session go through one async mutex, so a single manager never
//! runs two refreshes at once.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeDelta, Utc};
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::ClientError;
use crate::models::{AuthUser, SessionState, TokenBundle, session_state};
use crate::storage::{StoredSession, TokenStorage};
use crate::transport::AuthTransport;

/// Seconds without recorded activity after which the user counts as idle.
pub const INACTIVITY_TIMEOUT_SECS: i64 = 10 * 60;

const EVENT_CAPACITY: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn { username: String },
    Refreshed,
    LoggedOut(LogoutReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutReason {
    UserRequested,
    RefreshExpired,
    RefreshRejected,
}

pub struct TokenManager {
    storage: Arc<dyn TokenStorage>,
    transport: Arc<dyn AuthTransport>,
    clock: Arc<dyn Clock>,
    lock: Mutex<()>,
    events: broadcast::Sender<SessionEvent>,
}

impl TokenManager {
    pub fn new(storage: Arc<dyn TokenStorage>, transport: Arc<dyn AuthTransport>) -> Self {
        Self::with_clock(storage, transport, Arc::new(SystemClock))
    }

    pub fn with_clock(
        storage: Arc<dyn TokenStorage>,
        transport: Arc<dyn AuthTransport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            storage,
            transport,
            clock,
            lock: Mutex::new(()),
            events,
        }
    }

    /// Receive sign-in, refresh and logout notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub async fn state(&self) -> Result<SessionState, ClientError> {
        let _guard = self.lock.lock().await;
        let session = self.storage.load()?;
        Ok(session_state(session.bundle.as_ref(), self.clock.now()))
    }

    /// The stored bundle, if any. Exposed for status displays.
    pub async fn bundle(&self) -> Result<Option<TokenBundle>, ClientError> {
        let _guard = self.lock.lock().await;
        Ok(self.storage.load()?.bundle)
    }

    /// Sign in and persist the returned tokens.
    pub async fn login(
        &self,
        username_or_email: &str,
        password: &str,
    ) -> Result<AuthUser, ClientError> {
        let _guard = self.lock.lock().await;
        let resp = self.transport.login(username_or_email, password).await?;

        let now = self.clock.now();
        let session = StoredSession {
            bundle: Some(TokenBundle {
                access_token: resp.access_token,
                refresh_token: resp.refresh_token,
                expires_at: deadline(now, resp.expires_in)?,
                refresh_expires_at: deadline(now, resp.refresh_expires_in)?,
            }),
            last_activity: Some(now),
        };
        self.storage.save(&session)?;

        info!(username = %resp.user.username, "signed in");
        self.emit(SessionEvent::SignedIn {
            username: resp.user.username.clone(),
        });
        Ok(resp.user)
    }

    /// Bearer header for the next protected request, refreshing first if
    /// the access token has expired. `None` means the caller must sign in.
    pub async fn auth_header(&self) -> Result<Option<String>, ClientError> {
        let _guard = self.lock.lock().await;
        let mut session = self.storage.load()?;
        let now = self.clock.now();

        let Some(bundle) = session.bundle.as_mut() else {
            return Ok(None);
        };
        match bundle.state_at(now) {
            SessionState::NoSession => Ok(None),
            SessionState::ActiveAccess => Ok(Some(bearer(&bundle.access_token))),
            SessionState::RefreshExpired => {
                debug!("refresh token expired, clearing session");
                self.storage.clear()?;
                self.emit(SessionEvent::LoggedOut(LogoutReason::RefreshExpired));
                Ok(None)
            }
            SessionState::AccessExpiredRefreshValid => {
                let refreshed = self
                    .transport
                    .refresh(&bundle.refresh_token)
                    .await
                    .and_then(|resp| {
                        deadline(self.clock.now(), resp.expires_in)
                            .map(|expires_at| (resp.access_token, expires_at))
                    });
                match refreshed {
                    Ok((access_token, expires_at)) => {
                        bundle.access_token = access_token;
                        bundle.expires_at = expires_at;
                        let header = bearer(&bundle.access_token);
                        self.storage.save(&session)?;
                        debug!("access token refreshed");
                        self.emit(SessionEvent::Refreshed);
                        Ok(Some(header))
                    }
                    Err(e) => {
                        warn!(error = %e, "refresh failed, clearing session");
                        self.storage.clear()?;
                        self.emit(SessionEvent::LoggedOut(LogoutReason::RefreshRejected));
                        Ok(None)
                    }
                }
            }
        }
    }

    /// Sign out. The server call is best effort; local state is always cleared.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let _guard = self.lock.lock().await;
        if let Err(e) = self.transport.logout().await {
            warn!(error = %e, "server logout failed, clearing local session anyway");
        }
        self.storage.clear()?;
        info!("signed out");
        self.emit(SessionEvent::LoggedOut(LogoutReason::UserRequested));
        Ok(())
    }

    pub async fn record_activity(&self) -> Result<(), ClientError> {
        let _guard = self.lock.lock().await;
        let mut session = self.storage.load()?;
        session.last_activity = Some(self.clock.now());
        self.storage.save(&session)?;
        Ok(())
    }

    pub async fn last_activity(&self) -> Result<Option<DateTime<Utc>>, ClientError> {
        let _guard = self.lock.lock().await;
        Ok(self.storage.load()?.last_activity)
    }

    /// Advisory only; never clears tokens.
    pub async fn is_user_inactive(&self) -> Result<bool, ClientError> {
        let last = self.last_activity().await?;
        Ok(last.is_some_and(|t| {
            self.clock.now() - t > Duration::seconds(INACTIVITY_TIMEOUT_SECS)
        }))
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

/// `now + secs`, or an error when the server sent a lifetime chrono cannot represent.
fn deadline(now: DateTime<Utc>, secs: i64) -> Result<DateTime<Utc>, ClientError> {
    TimeDelta::try_seconds(secs)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| {
            ClientError::InvalidResponse(format!("token lifetime out of range: {secs}s"))
        })
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

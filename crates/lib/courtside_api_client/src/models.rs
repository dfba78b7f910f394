//! Wire and storage models used by the client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tokens persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBundle {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub refresh_expires_at: DateTime<Utc>,
}

/// Where a stored session stands at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NoSession,
    ActiveAccess,
    AccessExpiredRefreshValid,
    RefreshExpired,
}

impl TokenBundle {
    /// Classify this bundle at `now`. The refresh deadline is absolute: once
    /// it passes, the session is over even if the access token is not.
    pub fn state_at(&self, now: DateTime<Utc>) -> SessionState {
        if now >= self.refresh_expires_at {
            SessionState::RefreshExpired
        } else if now >= self.expires_at {
            SessionState::AccessExpiredRefreshValid
        } else {
            SessionState::ActiveAccess
        }
    }
}

/// State of an optional bundle.
pub fn session_state(bundle: Option<&TokenBundle>, now: DateTime<Utc>) -> SessionState {
    bundle.map_or(SessionState::NoSession, |b| b.state_at(now))
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest<'a> {
    pub username_or_email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub is_club_account: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub refresh_expires_in: i64,
    pub token_type: String,
    pub user: AuthUser,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub refresh_expires_in: i64,
    pub token_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffInput {
    pub name: String,
    pub role: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub quantity: i32,
    pub condition: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryInput {
    pub name: String,
    pub category: String,
    pub quantity: i32,
    pub condition: Option<String>,
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn bundle(t0: DateTime<Utc>) -> TokenBundle {
        TokenBundle {
            access_token: "a".into(),
            refresh_token: "r".into(),
            expires_at: t0 + Duration::minutes(15),
            refresh_expires_at: t0 + Duration::days(7),
        }
    }

    #[test]
    fn states_follow_deadlines() {
        let t0 = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();
        let b = bundle(t0);
        assert_eq!(session_state(None, t0), SessionState::NoSession);
        assert_eq!(b.state_at(t0), SessionState::ActiveAccess);
        assert_eq!(
            b.state_at(t0 + Duration::minutes(15)),
            SessionState::AccessExpiredRefreshValid
        );
        assert_eq!(b.state_at(t0 + Duration::days(7)), SessionState::RefreshExpired);
    }
}

//! Signing secret resolution.

use tracing::warn;

use super::AuthError;

/// Secrets shorter than this are accepted but logged as weak.
const MIN_SECRET_LEN: usize = 32;

/// Resolve the JWT secret: env var `JWT_SECRET` → `AUTH_SECRET`.
///
/// There is no fallback. A missing secret is a startup error.
pub fn resolve_jwt_secret() -> Result<String, AuthError> {
    secret_from(|key| std::env::var(key).ok())
}

/// Resolve the secret through an arbitrary variable lookup.
pub fn secret_from<F>(lookup: F) -> Result<String, AuthError>
where
    F: Fn(&str) -> Option<String>,
{
    let secret = ["JWT_SECRET", "AUTH_SECRET"]
        .into_iter()
        .filter_map(|key| lookup(key))
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty())
        .ok_or(AuthError::MissingSecret)?;

    if secret.len() < MIN_SECRET_LEN {
        warn!(
            length = secret.len(),
            minimum = MIN_SECRET_LEN,
            "JWT secret is shorter than recommended"
        );
    }
    Ok(secret)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn prefers_jwt_secret() {
        let vars = env(&[("JWT_SECRET", "primary"), ("AUTH_SECRET", "secondary")]);
        let secret = secret_from(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(secret, "primary");
    }

    #[test]
    fn falls_back_to_auth_secret_when_primary_blank() {
        let vars = env(&[("JWT_SECRET", "   "), ("AUTH_SECRET", "secondary")]);
        let secret = secret_from(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(secret, "secondary");
    }

    #[test]
    fn missing_secret_is_fatal() {
        let vars = env(&[]);
        let err = secret_from(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, AuthError::MissingSecret));
    }
}

//! # courtside_core
//!
//! Core domain logic for Courtside: identities, token issuance and
//! verification, password hashing, the club-account policy and the
//! persistence layer behind the API.

pub mod auth;
pub mod club;
pub mod db;
pub mod models;
pub mod store;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}

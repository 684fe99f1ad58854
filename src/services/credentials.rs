//! Username/password check against the user store.
//!
//! Passwords are stored as Argon2id PHC strings with a per-password salt.
//! Unknown users and wrong passwords both map to `AppError::InvalidLogin`,
//! and both pay for one Argon2 verification.
use std::sync::OnceLock;

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use rand_core::OsRng;
use uuid::Uuid;

use crate::error::AppError;
use crate::repos::UserStore;

/// Identity established by a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub username: String,
}

/// Hash `password` with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            tracing::error!(error = %e, "failed to hash password");
            AppError::Internal
        })
}

/// A stored hash that cannot be parsed never matches.
pub fn verify_password(hash: &str, candidate: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        tracing::warn!("stored password hash is not a PHC string");
        return false;
    };
    Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .is_ok()
}

// Verified against when the username is unknown
fn decoy_hash() -> Option<&'static str> {
    static DECOY: OnceLock<Option<String>> = OnceLock::new();
    DECOY
        .get_or_init(|| hash_password("decoy-password").ok())
        .as_deref()
}

pub async fn verify_credentials(
    store: &dyn UserStore,
    username: &str,
    password: &str,
) -> Result<Identity, AppError> {
    let Some(record) = store.fetch_by_username(username).await? else {
        if let Some(decoy) = decoy_hash() {
            let _ = verify_password(decoy, password);
        }
        tracing::info!(username, "sign-in for unknown petitioner");
        return Err(AppError::InvalidLogin);
    };

    if !verify_password(&record.password_hash, password) {
        tracing::info!(username, "sign-in with wrong password");
        return Err(AppError::InvalidLogin);
    }

    Ok(Identity {
        user_id: record.id,
        username: record.username,
    })
}

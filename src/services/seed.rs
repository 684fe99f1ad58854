//! Development seed for the in-memory petitioner store.
//!
//! The seed file is a JSON array of
//! `{"username": "...", "password": "...", "name"?: "...", "email"?: "..."}`.
//! Passwords are hashed on load; plaintext never reaches the store.
use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::repos::error::RepoError;
use crate::repos::{InMemoryUserStore, UserRecord};
use crate::services::credentials::hash_password;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SeedPetitioner {
    username: String,
    password: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("seed is not a valid petitioner list: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("seed entry {index}: {reason}")]
    Invalid { index: usize, reason: &'static str },
    #[error("seed lists username {0:?} more than once")]
    Duplicate(String),
    #[error("failed to hash seed password for {0:?}")]
    Hash(String),
    #[error(transparent)]
    Store(#[from] RepoError),
}

/// Parse the seed and hash every password.
pub fn parse_seed(raw: &str) -> Result<Vec<UserRecord>, SeedError> {
    let entries: Vec<SeedPetitioner> = serde_json::from_str(raw)?;
    let mut seen = HashSet::new();

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let username = entry.username.trim().to_string();
            if username.is_empty() {
                return Err(SeedError::Invalid {
                    index,
                    reason: "username must not be empty",
                });
            }
            if entry.password.is_empty() {
                return Err(SeedError::Invalid {
                    index,
                    reason: "password must not be empty",
                });
            }
            if !seen.insert(username.clone()) {
                return Err(SeedError::Duplicate(username));
            }

            let password_hash =
                hash_password(&entry.password).map_err(|_| SeedError::Hash(username.clone()))?;

            Ok(UserRecord {
                id: Uuid::new_v4(),
                username,
                name: entry.name,
                email: entry.email,
                password_hash,
            })
        })
        .collect()
}

/// Load every seeded petitioner into `store`. Returns how many were inserted.
pub fn seed_store(store: &InMemoryUserStore, raw: &str) -> Result<usize, SeedError> {
    let records = parse_seed(raw)?;
    let count = records.len();
    for record in records {
        tracing::debug!(username = %record.username, "seeding petitioner");
        store.insert(record)?;
    }
    Ok(count)
}

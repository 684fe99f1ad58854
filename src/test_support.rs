//! Shared fixtures for in-crate tests.
use std::sync::{Arc, OnceLock};

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::json;
use uuid::Uuid;

use crate::config::Config;
use crate::repos::{InMemoryUserStore, UserRecord, UserStore};
use crate::services::auth::{build_token_issuer, build_token_verifier};
use crate::services::credentials::hash_password;
use crate::state::AppState;

pub const TEST_SECRET: &str = "petitioner-test-secret";
pub const ALICE_PASSWORD: &str = "wonderland";

pub fn config() -> Config {
    Config::from_lookup(|key| match key {
        "JWT_SECRET" => Some(TEST_SECRET.to_string()),
        _ => None,
    })
    .expect("test config")
}

// Argon2 is slow; hash the fixture password once per test binary
fn alice_password_hash() -> String {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| hash_password(ALICE_PASSWORD).expect("hash alice password"))
        .clone()
}

pub fn alice() -> UserRecord {
    UserRecord {
        id: Uuid::new_v4(),
        username: "alice".to_string(),
        name: Some("Alice Liddell".to_string()),
        email: Some("alice@example.com".to_string()),
        password_hash: alice_password_hash(),
    }
}

pub fn state() -> AppState {
    let store = InMemoryUserStore::new();
    store.insert(alice()).expect("seed alice");
    state_with_store(Arc::new(store))
}

pub fn state_with_store(users: Arc<dyn UserStore>) -> AppState {
    let config = config();
    AppState::new(
        build_token_verifier(&config),
        build_token_issuer(&config),
        users,
    )
}

/// Token signed with `secret` whose `exp` is `ttl` seconds from now (negative: already expired).
pub fn token_signed_with(secret: &str, username: &str, ttl: i64) -> String {
    let exp = chrono::Utc::now().timestamp() + ttl;
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &json!({ "username": username, "exp": exp }),
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("sign test token")
}

pub fn token_for(username: &str) -> String {
    token_signed_with(TEST_SECRET, username, 3600)
}

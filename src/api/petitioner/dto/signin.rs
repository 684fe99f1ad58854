/*
 * Responsibility
 * - Sign-in request/response DTOs
 * - Shape checks live in validation::Schemas (run before deserializing)
 */
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub success: bool,
    pub token: String,
    /// Always "Bearer"
    pub token_type: &'static str,
    /// Seconds until expiry.
    pub expires_in: u64,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SignInStatusResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/*
 * Responsibility
 * - The "authenticated context" handlers see
 * - The gate verifies the token and stores this in request extensions;
 *   it never travels in HTTP headers and is dropped with the request
 */
use crate::services::auth::VerifiedAccessToken;

/// Context attached to an authenticated request.
///
/// - `username` is the identity every protected handler keys on
/// - `subject` is the token's `sub` claim, when the issuer set one
/// - `expires_at` is the token's `exp` (unix seconds)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    pub username: String,
    pub subject: Option<String>,
    pub expires_at: u64,
}

impl From<VerifiedAccessToken> for AuthCtx {
    fn from(v: VerifiedAccessToken) -> Self {
        Self {
            username: v.username,
            subject: v.subject,
            expires_at: v.expires_at,
        }
    }
}

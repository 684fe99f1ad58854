use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::Serialize;
use tracing::error;

use crate::error::AppError;
use crate::services::auth::access_jwt::now_unix;
use crate::services::credentials::Identity;

#[derive(Debug, Serialize)]
struct AccessTokenClaims<'a> {
    username: &'a str,
    sub: String,
    iat: u64,
    exp: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    iss: Option<&'a str>,
}

/// Signed token plus its lifetime, as returned to the client on sign-in.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: u64,
}

/// Signs HS256 access tokens with the same shared secret the gate verifies with.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    issuer: Option<String>,
    ttl_seconds: u64,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("issuer", &self.issuer)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl TokenIssuer {
    pub fn new(secret: &str, issuer: Option<String>, ttl_seconds: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            issuer,
            ttl_seconds,
        }
    }

    pub fn issue(&self, identity: &Identity) -> Result<IssuedToken, AppError> {
        self.issue_at(identity, now_unix())
    }

    pub fn issue_at(&self, identity: &Identity, now: u64) -> Result<IssuedToken, AppError> {
        let exp = now.checked_add(self.ttl_seconds).ok_or_else(|| {
            error!(now, ttl_seconds = self.ttl_seconds, "token expiry overflows");
            AppError::Internal
        })?;

        let claims = AccessTokenClaims {
            username: &identity.username,
            sub: identity.user_id.to_string(),
            iat: now,
            exp,
            iss: self.issuer.as_deref(),
        };

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        let token = jsonwebtoken::encode(&header, &claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign JWT");
            AppError::Internal
        })?;

        Ok(IssuedToken {
            token,
            expires_in: self.ttl_seconds,
        })
    }
}

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::{error::Error as StdError, fmt};

// Errors returned by access-token verification + strict claim validation.
#[derive(Debug)]
pub enum AccessJwtError {
    Jwt(jsonwebtoken::errors::Error),
    Expired { exp: u64, now: u64 },
    EmptyClaim(&'static str),
    IssuerMismatch,
}

impl fmt::Display for AccessJwtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jwt(e) => write!(f, "jwt verification failed: {}", e),
            Self::Expired { exp, now } => write!(f, "token expired at {} (now {})", exp, now),
            Self::EmptyClaim(name) => write!(f, "empty '{}' claim", name),
            Self::IssuerMismatch => write!(f, "missing or unexpected 'iss' claim"),
        }
    }
}

impl StdError for AccessJwtError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Jwt(e) => Some(e),
            _ => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AccessJwtError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Jwt(e)
    }
}

/// Access token (JWT) claims as presented by the client.
///
/// NOTE:
/// - `username` is the only identity claim downstream handlers rely on.
/// - `exp` is checked here (not by jsonwebtoken) so the expiry instant itself is rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenClaims {
    #[serde(default)]
    pub username: String,
    pub exp: u64,

    #[serde(default)]
    pub iss: Option<String>,
    #[serde(default)]
    pub sub: Option<String>,
}

/// What the gate hands to handlers after a successful check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedAccessToken {
    pub username: String,
    pub subject: Option<String>,
    pub expires_at: u64,
}

/// HS256 access-token verifier bound to the process-wide shared secret.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct AccessTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: Option<String>,
    leeway_seconds: u64,
}

impl fmt::Debug for AccessTokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("AccessTokenVerifier")
            .field("issuer", &self.issuer)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish()
    }
}

impl AccessTokenVerifier {
    pub fn new(secret: &str, issuer: Option<String>, leeway_seconds: u64) -> Self {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);
        validation.validate_exp = false;
        validation.validate_aud = false;

        Self {
            decoding_key,
            validation,
            issuer,
            leeway_seconds,
        }
    }

    pub fn verify(&self, token: &str) -> Result<VerifiedAccessToken, AccessJwtError> {
        self.verify_at(token, now_unix())
    }

    /// Signature + strict claim validation against an explicit clock.
    ///
    /// Checks:
    /// - HS256 signature (jsonwebtoken)
    /// - `exp` present and `now < exp + leeway`
    /// - `username` present and not blank
    /// - `iss` equals the configured issuer, when one is configured
    pub fn verify_at(
        &self,
        token: &str,
        now: u64,
    ) -> Result<VerifiedAccessToken, AccessJwtError> {
        let data = jsonwebtoken::decode::<AccessTokenClaims>(
            token,
            &self.decoding_key,
            &self.validation,
        )?;
        let claims = data.claims;

        if now >= claims.exp.saturating_add(self.leeway_seconds) {
            return Err(AccessJwtError::Expired {
                exp: claims.exp,
                now,
            });
        }
        if claims.username.trim().is_empty() {
            return Err(AccessJwtError::EmptyClaim("username"));
        }
        if let Some(expected) = &self.issuer
            && claims.iss.as_deref() != Some(expected.as_str())
        {
            return Err(AccessJwtError::IssuerMismatch);
        }

        Ok(VerifiedAccessToken {
            username: claims.username,
            subject: claims.sub,
            expires_at: claims.exp,
        })
    }
}

pub(crate) fn now_unix() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::json;

    use super::*;

    const SECRET: &str = "test-secret";
    const NOW: u64 = 1_700_000_000;

    fn sign(secret: &str, claims: serde_json::Value) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn verifier() -> AccessTokenVerifier {
        AccessTokenVerifier::new(SECRET, None, 0)
    }

    #[test]
    fn accepts_valid_token() {
        let token = sign(SECRET, json!({ "username": "alice", "exp": NOW + 60 }));
        let verified = verifier().verify_at(&token, NOW).unwrap();
        assert_eq!(verified.username, "alice");
        assert_eq!(verified.expires_at, NOW + 60);
    }

    #[test]
    fn verifying_twice_yields_same_identity() {
        let token = sign(SECRET, json!({ "username": "alice", "exp": NOW + 60 }));
        let v = verifier();
        assert_eq!(v.verify_at(&token, NOW).unwrap(), v.verify_at(&token, NOW).unwrap());
    }

    #[test]
    fn expiry_instant_is_invalid() {
        let exp = NOW + 30;
        let token = sign(SECRET, json!({ "username": "alice", "exp": exp }));
        let v = verifier();

        assert!(v.verify_at(&token, exp - 1).is_ok());
        assert!(matches!(
            v.verify_at(&token, exp),
            Err(AccessJwtError::Expired { .. })
        ));
        assert!(matches!(
            v.verify_at(&token, exp + 1),
            Err(AccessJwtError::Expired { .. })
        ));
    }

    #[test]
    fn leeway_extends_expiry() {
        let token = sign(SECRET, json!({ "username": "alice", "exp": NOW }));
        let v = AccessTokenVerifier::new(SECRET, None, 10);
        assert!(v.verify_at(&token, NOW + 9).is_ok());
        assert!(v.verify_at(&token, NOW + 10).is_err());
    }

    #[test]
    fn rejects_wrong_signature() {
        let token = sign("other-secret", json!({ "username": "alice", "exp": NOW + 60 }));
        assert!(matches!(
            verifier().verify_at(&token, NOW),
            Err(AccessJwtError::Jwt(_))
        ));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            verifier().verify_at("garbage", NOW),
            Err(AccessJwtError::Jwt(_))
        ));
    }

    #[test]
    fn rejects_missing_exp() {
        let token = sign(SECRET, json!({ "username": "alice" }));
        assert!(verifier().verify_at(&token, NOW).is_err());
    }

    #[test]
    fn rejects_blank_username() {
        let token = sign(SECRET, json!({ "username": "  ", "exp": NOW + 60 }));
        assert!(matches!(
            verifier().verify_at(&token, NOW),
            Err(AccessJwtError::EmptyClaim("username"))
        ));
    }

    #[test]
    fn issuer_is_enforced_when_configured() {
        let v = AccessTokenVerifier::new(SECRET, Some("vakalatnama".into()), 0);
        let good = sign(
            SECRET,
            json!({ "username": "alice", "exp": NOW + 60, "iss": "vakalatnama" }),
        );
        let other = sign(
            SECRET,
            json!({ "username": "alice", "exp": NOW + 60, "iss": "elsewhere" }),
        );
        let missing = sign(SECRET, json!({ "username": "alice", "exp": NOW + 60 }));

        assert!(v.verify_at(&good, NOW).is_ok());
        assert!(matches!(
            v.verify_at(&other, NOW),
            Err(AccessJwtError::IssuerMismatch)
        ));
        assert!(matches!(
            v.verify_at(&missing, NOW),
            Err(AccessJwtError::IssuerMismatch)
        ));
    }
}

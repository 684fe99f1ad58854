/// Factory: build the token verifier / issuer from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{AccessTokenVerifier, TokenIssuer};

pub fn build_token_verifier(config: &Config) -> Arc<AccessTokenVerifier> {
    Arc::new(AccessTokenVerifier::new(
        &config.jwt_secret,
        config.jwt_issuer.clone(),
        config.access_token_leeway_seconds,
    ))
}

pub fn build_token_issuer(config: &Config) -> Arc<TokenIssuer> {
    Arc::new(TokenIssuer::new(
        &config.jwt_secret,
        config.jwt_issuer.clone(),
        config.access_token_ttl_seconds,
    ))
}

pub mod access_jwt;
pub mod factory;
pub mod token_issuer;

pub use access_jwt::{AccessTokenVerifier, VerifiedAccessToken};
pub use factory::{build_token_issuer, build_token_verifier};
pub use token_issuer::{IssuedToken, TokenIssuer};

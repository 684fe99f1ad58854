/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 *   - token verifier/issuer, user store, validation schemas
 * - Cheap to Clone (everything behind Arc); lives for the whole process
 */
use std::sync::Arc;

use crate::api::petitioner::validation::Schemas;
use crate::repos::UserStore;
use crate::services::auth::{AccessTokenVerifier, TokenIssuer};

#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<AccessTokenVerifier>,
    pub issuer: Arc<TokenIssuer>,
    pub users: Arc<dyn UserStore>,
    pub schemas: Arc<Schemas>,
}

impl AppState {
    pub fn new(
        verifier: Arc<AccessTokenVerifier>,
        issuer: Arc<TokenIssuer>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            verifier,
            issuer,
            users,
            schemas: Arc::new(Schemas::new()),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("verifier", &self.verifier)
            .field("issuer", &self.issuer)
            .field("users", &self.users.backend_name())
            .finish()
    }
}

//! Bearer token (HS256 JWT) check → AuthCtx in request extensions.
//!
//! The decision is a value (`GateDecision`), and the middleware only reaches
//! `next` from the `Continue` arm. A rejected request never runs the handler.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};

use crate::api::petitioner::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::AccessTokenVerifier;
use crate::state::AppState;

/// Outcome of gating one request.
#[derive(Debug)]
pub enum GateDecision {
    Continue(AuthCtx),
    Reject(AppError),
}

/// Put every route of `router` behind the gate.
///
/// Example:
/// ```ignore
/// let protected = Router::new().route("/dashboard", get(dashboard));
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // route_layer: unmatched paths fall through to 404 instead of 401
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

/// Token following `"Bearer "` in the Authorization header. Blank counts as absent.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

pub fn evaluate(verifier: &AccessTokenVerifier, headers: &HeaderMap) -> GateDecision {
    let Some(token) = bearer_token(headers) else {
        tracing::debug!("no bearer token on request");
        return GateDecision::Reject(AppError::MissingCredential);
    };

    match verifier.verify(token) {
        Ok(verified) => GateDecision::Continue(AuthCtx::from(verified)),
        Err(err) => {
            tracing::warn!(error = %err, "access token verification failed");
            GateDecision::Reject(AppError::InvalidCredential)
        }
    }
}

/// Identity for routes that behave differently when signed in but never reject.
pub fn authenticate_optional(
    verifier: &AccessTokenVerifier,
    headers: &HeaderMap,
) -> Option<AuthCtx> {
    match evaluate(verifier, headers) {
        GateDecision::Continue(ctx) => Some(ctx),
        GateDecision::Reject(_) => None,
    }
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    match evaluate(&state.verifier, req.headers()) {
        GateDecision::Reject(err) => err.into_response(),
        GateDecision::Continue(auth_ctx) => {
            tracing::debug!(
                username = %auth_ctx.username,
                subject = ?auth_ctx.subject,
                expires_at = auth_ctx.expires_at,
                "request authenticated"
            );
            // middleware → extractor
            req.extensions_mut().insert(auth_ctx);
            next.run(req).await
        }
    }
}

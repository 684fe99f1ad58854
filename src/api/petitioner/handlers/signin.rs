/*
 * Responsibility
 * - GET  /petitioner         → redirect to dashboard or sign-in
 * - GET  /petitioner/signin  → whether the caller already holds a valid token
 * - POST /petitioner/signin  → validate → verify credentials → issue token
 */
use axum::{
    Json,
    extract::State,
    http::HeaderMap,
    response::Redirect,
};

use crate::{
    api::petitioner::{
        dto::signin::{SignInRequest, SignInResponse, SignInStatusResponse},
        extractors::JsonBody,
    },
    error::{AppError, FieldError},
    middleware::auth::access::authenticate_optional,
    services::credentials::verify_credentials,
    state::AppState,
};

pub async fn entry(State(state): State<AppState>, headers: HeaderMap) -> Redirect {
    match authenticate_optional(&state.verifier, &headers) {
        Some(_) => Redirect::to("/petitioner/dashboard"),
        None => Redirect::to("/petitioner/signin"),
    }
}

pub async fn sign_in_status(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<SignInStatusResponse> {
    let ctx = authenticate_optional(&state.verifier, &headers);

    Json(SignInStatusResponse {
        authenticated: ctx.is_some(),
        username: ctx.map(|c| c.username),
    })
}

pub async fn sign_in(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Json<SignInResponse>, AppError> {
    state.schemas.signin.validate(&body)?;
    let req: SignInRequest = serde_json::from_value(body)
        .map_err(|e| AppError::validation(vec![FieldError::new("body", e.to_string())]))?;

    let identity = verify_credentials(state.users.as_ref(), &req.username, &req.password).await?;
    let issued = state.issuer.issue(&identity)?;

    tracing::info!(username = %identity.username, "petitioner signed in");

    Ok(Json(SignInResponse {
        success: true,
        token: issued.token,
        token_type: "Bearer",
        expires_in: issued.expires_in,
        message: "Signed in successfully",
    }))
}

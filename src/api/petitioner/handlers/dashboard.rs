/*
 * Responsibility
 * - Protected dashboard handlers (the gate has already attached AuthCtx)
 * - Read/update the signed-in petitioner's record through UserStore
 * - Store failures become 500 (logged in From<RepoError>)
 */
use axum::{Json, extract::State};

use crate::{
    api::petitioner::{
        dto::dashboard::{
            DashboardData, DataResponse, EditFormData, MessageResponse, ProfileUpdateRequest,
        },
        extractors::{AuthCtxExtractor, JsonBody},
    },
    error::{AppError, FieldError},
    repos::{ProfileUpdate, UserRecord},
    state::AppState,
};

async fn load_petitioner(state: &AppState, username: &str) -> Result<UserRecord, AppError> {
    state
        .users
        .fetch_by_username(username)
        .await?
        .ok_or(AppError::NotFound("petitioner"))
}

pub async fn dashboard(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<DataResponse<DashboardData>>, AppError> {
    let row = load_petitioner(&state, &ctx.username).await?;
    Ok(Json(DataResponse::ok(row.into())))
}

pub async fn edit_form(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<DataResponse<EditFormData>>, AppError> {
    let row = load_petitioner(&state, &ctx.username).await?;
    Ok(Json(DataResponse::ok(row.into())))
}

pub async fn update_profile(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    JsonBody(body): JsonBody,
) -> Result<Json<MessageResponse>, AppError> {
    state.schemas.profile_update.validate(&body)?;
    let req: ProfileUpdateRequest = serde_json::from_value(body)
        .map_err(|e| AppError::validation(vec![FieldError::new("body", e.to_string())]))?;
    let update = ProfileUpdate::from(req);

    state
        .users
        .update_by_username(&ctx.username, &update)
        .await?
        .ok_or(AppError::NotFound("petitioner"))?;

    tracing::info!(
        username = %ctx.username,
        name = update.name.is_some(),
        email = update.email.is_some(),
        "petitioner profile updated"
    );

    Ok(Json(MessageResponse {
        success: true,
        message: "Profile updated successfully",
    }))
}

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{favorite, review, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::auth::UserResponse;
use crate::models::profile::{UpdateProfileRequest, validate_update_profile};
use crate::models::shared::normalize_email;
use crate::state::AppState;

#[utoipa::path(
    patch,
    path = "/api/v1/profile",
    tag = "Profile",
    operation_id = "updateProfile",
    summary = "Update name and email",
    description = "Updates the caller's display name and email. The new email is \
        lowercased and must not belong to another account. The change is visible \
        on the next request without re-login.",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 409, description = "Email already in use (EMAIL_TAKEN)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.id))]
pub async fn update_profile(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, AppError> {
    validate_update_profile(&payload)?;

    let email = normalize_email(&payload.email);

    let active = user::ActiveModel {
        id: Unchanged(auth_user.id),
        name: Set(payload.name.trim().to_string()),
        email: Set(email),
        ..Default::default()
    };

    // Uniqueness is settled by the constraint, not a racy pre-check.
    let updated = active.update(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::EmailTaken,
        _ => AppError::from(e),
    })?;

    Ok(Json(UserResponse::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/profile",
    tag = "Profile",
    operation_id = "deleteAccount",
    summary = "Delete the caller's account",
    description = "Permanently deletes the account together with its favorites and \
        reviews, in one transaction. Outstanding tokens for the account stop working \
        immediately. Uploaded avatar bytes are left to the media store's cleanup.",
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.id))]
pub async fn delete_account(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;

    favorite::Entity::delete_many()
        .filter(favorite::Column::UserId.eq(auth_user.id))
        .exec(&txn)
        .await?;

    review::Entity::delete_many()
        .filter(review::Column::UserId.eq(auth_user.id))
        .exec(&txn)
        .await?;

    user::Entity::delete_by_id(auth_user.id).exec(&txn).await?;

    txn.commit().await?;

    tracing::info!(user_id = auth_user.id, "Account deleted");

    Ok(StatusCode::NO_CONTENT)
}

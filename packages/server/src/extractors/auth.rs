use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::{DateTime, Utc};
use sea_orm::EntityTrait;

use crate::entity::user;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt;

/// Session principal extracted from the `Authorization: Bearer <token>`
/// header. Add this as a handler parameter to require authentication.
///
/// The token only carries the user id; the rest of the principal is
/// re-read from the store on every request, so a profile edit or avatar
/// change is visible immediately without re-authentication. A token whose
/// user no longer exists (deleted account) is rejected as invalid.
pub struct AuthUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::TokenMissing)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AppError::TokenInvalid)?;

        let claims = jwt::verify(token, &state.config.auth.jwt_secret)
            .map_err(|_| AppError::TokenInvalid)?;

        let user = user::Entity::find_by_id(claims.uid)
            .one(&state.db)
            .await?
            .ok_or(AppError::TokenInvalid)?;

        Ok(AuthUser {
            id: user.id,
            name: user.name,
            email: user.email,
            image: user.image,
            created_at: user.created_at,
        })
    }
}

/// Optional authentication: resolves to `None` instead of rejecting when
/// the request carries no usable session. Store failures still propagate.
///
/// Used by reads like the favorite check, which must answer
/// `isFavorite=false` for anonymous callers rather than erroring.
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match AuthUser::from_request_parts(parts, state).await {
            Ok(user) => Ok(MaybeAuthUser(Some(user))),
            Err(AppError::Internal(detail)) => Err(AppError::Internal(detail)),
            Err(_) => Ok(MaybeAuthUser(None)),
        }
    }
}

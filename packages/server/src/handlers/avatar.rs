use axum::body::Body;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::storage::ContentHash;
use sea_orm::*;
use tokio_util::io::ReaderStream;
use tracing::instrument;

use crate::entity::user;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::models::profile::AvatarResponse;
use crate::state::AppState;

/// Body limit for avatar uploads, a little above the file cap to leave
/// room for multipart framing.
pub fn avatar_upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(5 * 1024 * 1024)
}

#[utoipa::path(
    post,
    path = "/api/v1/profile/avatar",
    tag = "Profile",
    operation_id = "uploadAvatar",
    summary = "Upload an avatar",
    description = "Replaces the caller's avatar with the image in the `file` multipart \
        field. Only `image/*` content is accepted, up to 4 MiB. The previous avatar's \
        bytes are removed unless another account shares them. The new URL is visible \
        on the next request without re-login.",
    request_body(content_type = "multipart/form-data", description = "Image file upload"),
    responses(
        (status = 200, description = "Avatar stored", body = AvatarResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, multipart), fields(user_id = auth_user.id))]
pub async fn upload_avatar(
    auth_user: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AvatarResponse>, AppError> {
    let mut file: Option<(Vec<u8>, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() == Some("file") {
            let content_type = field
                .content_type()
                .map(|m| m.to_string())
                .ok_or_else(|| AppError::Validation("File field must have a content type".into()))?;
            if !content_type.starts_with("image/") {
                return Err(AppError::Validation("Avatar must be an image".into()));
            }
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;
            file = Some((data.to_vec(), content_type));
            break;
        }
    }

    let (data, content_type) =
        file.ok_or_else(|| AppError::Validation("Missing 'file' field".into()))?;

    let max = state.config.storage.max_avatar_size;
    if data.len() as u64 > max {
        return Err(AppError::Validation(format!(
            "Avatar exceeds maximum size of {max} bytes"
        )));
    }

    let hash = state.media.put(&data).await?;
    let url = format!("/api/v1/avatars/{}.{}", hash.to_hex(), extension_for(&content_type));

    let previous = auth_user.image.clone();

    let active = user::ActiveModel {
        id: Unchanged(auth_user.id),
        image: Set(Some(url.clone())),
        ..Default::default()
    };
    active.update(&state.db).await?;

    if let Some(old_url) = previous
        && old_url != url
    {
        remove_unreferenced_avatar(&state, &old_url).await;
    }

    Ok(Json(AvatarResponse { url }))
}

#[utoipa::path(
    get,
    path = "/api/v1/avatars/{file}",
    tag = "Profile",
    operation_id = "getAvatar",
    summary = "Serve an avatar",
    description = "Streams avatar content by its content-addressed filename. Supports \
        ETag-based caching via If-None-Match. No authentication required.",
    params(("file" = String, Path, description = "Avatar filename, `<hash>.<ext>`")),
    responses(
        (status = 200, description = "Avatar content"),
        (status = 304, description = "Not Modified (ETag match)"),
        (status = 404, description = "Avatar not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, headers), fields(file))]
pub async fn get_avatar(
    State(state): State<AppState>,
    Path(file): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let (hex, _ext) = file
        .split_once('.')
        .ok_or_else(|| AppError::NotFound("File not found".into()))?;

    let hash =
        ContentHash::from_hex(hex).map_err(|_| AppError::NotFound("File not found".into()))?;

    // Content-addressed names never change their bytes, so a matching
    // ETag is always still valid.
    let etag_value = format!("\"{hex}\"");
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && let Ok(val) = if_none_match.to_str()
        && (val == etag_value || val == "*")
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let reader = state.media.get_stream(&hash).await?;
    let stream = ReaderStream::new(reader);
    let body = Body::from_stream(stream);

    let content_type = mime_guess::from_path(&file)
        .first()
        .map(|m| m.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::ETAG, &etag_value)
        .header(header::CACHE_CONTROL, "public, max-age=86400")
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))?;

    Ok(response)
}

/// File extension for the stored avatar URL, derived from the upload's
/// content type.
fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        "image/avif" => "avif",
        _ => "jpg",
    }
}

/// Best-effort removal of a replaced avatar's bytes. Identical uploads
/// share one object, so the blob stays if any other account still points
/// at the same URL. Failures are logged and ignored; the replacement
/// itself already succeeded.
async fn remove_unreferenced_avatar(state: &AppState, old_url: &str) {
    let still_referenced = user::Entity::find()
        .filter(user::Column::Image.eq(old_url))
        .count(&state.db)
        .await;
    match still_referenced {
        Ok(0) => {}
        Ok(_) => return,
        Err(e) => {
            tracing::warn!("Could not check avatar references: {e}");
            return;
        }
    }

    let Some(hex) = old_url
        .rsplit('/')
        .next()
        .and_then(|f| f.split_once('.'))
        .map(|(h, _)| h)
    else {
        return;
    };
    let Ok(hash) = ContentHash::from_hex(hex) else {
        return;
    };
    if let Err(e) = state.media.delete(&hash).await {
        tracing::warn!("Could not delete replaced avatar {hex}: {e}");
    }
}

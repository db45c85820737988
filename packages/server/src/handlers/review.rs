use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{film, review, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::review::{
    ReviewAuthor, ReviewListQuery, ReviewListResponse, ReviewResponse, ReviewUpsertResponse,
    UpsertReviewRequest, rounded_average, validate_upsert_review,
};
use crate::state::AppState;
use crate::utils::sanitize::sanitize_comment;

#[utoipa::path(
    get,
    path = "/api/v1/reviews",
    tag = "Reviews",
    operation_id = "listReviews",
    summary = "List a film's reviews",
    description = "Returns all reviews for a film, newest first, with the author of each \
        and the aggregate (mean rating rounded to one decimal, review count). The \
        average is null when the film has no reviews. An unknown film id yields the \
        empty aggregate rather than an error. No authentication required.",
    params(ReviewListQuery),
    responses(
        (status = 200, description = "Reviews and aggregate", body = ReviewListResponse),
    ),
)]
#[instrument(skip(state, query), fields(film_id = query.film_id))]
pub async fn list_reviews(
    State(state): State<AppState>,
    Query(query): Query<ReviewListQuery>,
) -> Result<Json<ReviewListResponse>, AppError> {
    let rows = review::Entity::find()
        .filter(review::Column::FilmId.eq(query.film_id))
        .order_by_desc(review::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let ratings: Vec<i32> = rows.iter().map(|r| r.rating).collect();
    let average = rounded_average(&ratings);
    let count = rows.len() as u64;

    let user_ids: Vec<i32> = rows.iter().map(|r| r.user_id).collect();
    let authors: HashMap<i32, user::Model> = user::Entity::find()
        .filter(user::Column::Id.is_in(user_ids))
        .all(&state.db)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    let reviews = rows
        .into_iter()
        .filter_map(|r| {
            let author = authors.get(&r.user_id)?.clone();
            Some(ReviewResponse::new(r, ReviewAuthor::from(author)))
        })
        .collect();

    Ok(Json(ReviewListResponse {
        reviews,
        average,
        count,
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/reviews",
    tag = "Reviews",
    operation_id = "upsertReview",
    summary = "Create or replace the caller's review",
    description = "Writes the caller's review of a film. A user holds at most one review \
        per film: a second submission replaces the rating and comment of the first \
        instead of adding a row, even when two submissions race. The comment is \
        stripped of HTML before storage.",
    request_body = UpsertReviewRequest,
    responses(
        (status = 200, description = "Review written", body = ReviewUpsertResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Film not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.id, film_id = payload.film_id))]
pub async fn upsert_review(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpsertReviewRequest>,
) -> Result<Json<ReviewUpsertResponse>, AppError> {
    validate_upsert_review(&payload)?;

    find_film(&state.db, payload.film_id).await?;

    let comment = payload.comment.as_deref().and_then(sanitize_comment);
    let now = chrono::Utc::now();

    let new_review = review::ActiveModel {
        user_id: Set(auth_user.id),
        film_id: Set(payload.film_id),
        rating: Set(payload.rating),
        comment: Set(comment),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    review::Entity::insert(new_review)
        .on_conflict(
            OnConflict::columns([review::Column::UserId, review::Column::FilmId])
                .update_columns([
                    review::Column::Rating,
                    review::Column::Comment,
                    review::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(&state.db)
        .await?;

    let saved = review::Entity::find()
        .filter(review::Column::UserId.eq(auth_user.id))
        .filter(review::Column::FilmId.eq(payload.film_id))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::Internal("review missing after upsert".into()))?;

    let author = ReviewAuthor {
        id: auth_user.id,
        name: auth_user.name,
        image: auth_user.image,
    };

    Ok(Json(ReviewUpsertResponse {
        review: ReviewResponse::new(saved, author),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/v1/reviews/{id}",
    tag = "Reviews",
    operation_id = "deleteReview",
    summary = "Delete a review",
    description = "Deletes one of the caller's reviews. Deleting someone else's review \
        is forbidden.",
    params(("id" = i32, Path, description = "Review ID")),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the review's author (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Review not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.id, id))]
pub async fn delete_review(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let existing = review::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Review not found".into()))?;

    if existing.user_id != auth_user.id {
        return Err(AppError::PermissionDenied);
    }

    review::Entity::delete_by_id(id).exec(&state.db).await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn find_film<C: ConnectionTrait>(db: &C, id: i32) -> Result<film::Model, AppError> {
    film::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Film not found".into()))
}

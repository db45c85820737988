use std::collections::HashMap;

use axum::Json;
use axum::extract::{Query, State};
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{favorite, film};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::{AuthUser, MaybeAuthUser};
use crate::extractors::json::AppJson;
use crate::models::favorite::{
    FavoriteCheckQuery, FavoriteFilmRef, FavoriteItem, FavoriteStatusResponse,
    FavoritesListResponse, ToggleFavoriteRequest,
};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/favorites/toggle",
    tag = "Favorites",
    operation_id = "toggleFavorite",
    summary = "Toggle a favorite",
    description = "Adds the film to the caller's favorites if absent, removes it if \
        present, and reports the resulting state. Concurrent duplicate adds collapse \
        to a single favorite.",
    request_body = ToggleFavoriteRequest,
    responses(
        (status = 200, description = "State after the toggle", body = FavoriteStatusResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Film not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.id, film_id = payload.film_id))]
pub async fn toggle_favorite(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<ToggleFavoriteRequest>,
) -> Result<Json<FavoriteStatusResponse>, AppError> {
    find_film(&state.db, payload.film_id).await?;

    let existing = favorite::Entity::find_by_id((auth_user.id, payload.film_id))
        .one(&state.db)
        .await?;

    let is_favorite = match existing {
        Some(_) => {
            favorite::Entity::delete_by_id((auth_user.id, payload.film_id))
                .exec(&state.db)
                .await?;
            false
        }
        None => {
            let new_fav = favorite::ActiveModel {
                user_id: Set(auth_user.id),
                film_id: Set(payload.film_id),
                created_at: Set(chrono::Utc::now()),
            };
            // A racing duplicate add loses on the primary key; that still
            // means the film is favorited, which is the answer we report.
            let res = favorite::Entity::insert(new_fav)
                .on_conflict(
                    OnConflict::columns([favorite::Column::UserId, favorite::Column::FilmId])
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(&state.db)
                .await;
            match res {
                Ok(_) | Err(DbErr::RecordNotInserted) => {}
                Err(e) => return Err(e.into()),
            }
            true
        }
    };

    Ok(Json(FavoriteStatusResponse { is_favorite }))
}

#[utoipa::path(
    get,
    path = "/api/v1/favorites/toggle",
    tag = "Favorites",
    operation_id = "checkFavorite",
    summary = "Check whether a film is favorited",
    description = "Reports whether the film is in the caller's favorites. Anonymous \
        callers get `false` rather than an error.",
    params(FavoriteCheckQuery),
    responses(
        (status = 200, description = "Favorite state", body = FavoriteStatusResponse),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, maybe_user, query), fields(film_id = query.film_id))]
pub async fn check_favorite(
    MaybeAuthUser(maybe_user): MaybeAuthUser,
    State(state): State<AppState>,
    Query(query): Query<FavoriteCheckQuery>,
) -> Result<Json<FavoriteStatusResponse>, AppError> {
    let is_favorite = match maybe_user {
        Some(user) => favorite::Entity::find_by_id((user.id, query.film_id))
            .one(&state.db)
            .await?
            .is_some(),
        None => false,
    };

    Ok(Json(FavoriteStatusResponse { is_favorite }))
}

#[utoipa::path(
    get,
    path = "/api/v1/favorites",
    tag = "Favorites",
    operation_id = "listFavorites",
    summary = "List the caller's favorites",
    description = "Returns the caller's favorites, most recently added first, each with \
        a film summary.",
    responses(
        (status = 200, description = "Favorites list", body = FavoritesListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.id))]
pub async fn list_favorites(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<FavoritesListResponse>, AppError> {
    let rows = favorite::Entity::find()
        .filter(favorite::Column::UserId.eq(auth_user.id))
        .order_by_desc(favorite::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let film_ids: Vec<i32> = rows.iter().map(|f| f.film_id).collect();
    let films: HashMap<i32, film::Model> = film::Entity::find()
        .filter(film::Column::Id.is_in(film_ids))
        .all(&state.db)
        .await?
        .into_iter()
        .map(|f| (f.id, f))
        .collect();

    let favorites = rows
        .into_iter()
        .filter_map(|f| {
            let film = films.get(&f.film_id)?.clone();
            Some(FavoriteItem {
                film_id: f.film_id,
                created_at: f.created_at,
                film: FavoriteFilmRef::from(film),
            })
        })
        .collect();

    Ok(Json(FavoritesListResponse { favorites }))
}

async fn find_film<C: ConnectionTrait>(db: &C, id: i32) -> Result<film::Model, AppError> {
    film::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Film not found".into()))
}

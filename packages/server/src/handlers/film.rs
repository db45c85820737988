use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{film, film_person, person};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::film::{
    CastMember, FilmDetail, FilmDetailResponse, FilmListResponse, FilmResponse, ImportFilmRequest,
    validate_import_film,
};
use crate::models::shared::{PageQuery, Pagination};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/films",
    tag = "Films",
    operation_id = "listFilms",
    summary = "List films",
    description = "Returns a page of the catalog ordered by release date, newest first. \
        No authentication required.",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of films", body = FilmListResponse),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_films(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<FilmListResponse>, AppError> {
    let (page, limit) = query.resolve(10);

    let select = film::Entity::find().order_by_desc(film::Column::ReleaseDate);

    let total = select.clone().paginate(&state.db, limit).num_items().await?;
    let total_pages = total.div_ceil(limit);

    let films = select
        .offset(Some(page.saturating_sub(1).saturating_mul(limit)))
        .limit(Some(limit))
        .all(&state.db)
        .await?
        .into_iter()
        .map(FilmResponse::from)
        .collect();

    Ok(Json(FilmListResponse {
        films,
        pagination: Pagination {
            page,
            limit,
            total,
            total_pages,
        },
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/films/{id}",
    tag = "Films",
    operation_id = "getFilm",
    summary = "Get a film with its cast",
    description = "Returns one film with the people appearing in it. No authentication required.",
    params(("id" = i32, Path, description = "Film ID")),
    responses(
        (status = 200, description = "Film details", body = FilmDetailResponse),
        (status = 404, description = "Film not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_film(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<FilmDetailResponse>, AppError> {
    let model = find_film(&state.db, id).await?;

    let people = person::Entity::find()
        .filter(
            person::Column::Id.in_subquery(
                sea_orm::sea_query::Query::select()
                    .column(film_person::Column::PersonId)
                    .from(film_person::Entity)
                    .and_where(film_person::Column::FilmId.eq(id))
                    .to_owned(),
            ),
        )
        .order_by_asc(person::Column::Name)
        .all(&state.db)
        .await?
        .into_iter()
        .map(CastMember::from)
        .collect();

    Ok(Json(FilmDetailResponse {
        film: FilmDetail {
            film: FilmResponse::from(model),
            people,
        },
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/films",
    tag = "Films",
    operation_id = "importFilm",
    summary = "Import or refresh a film",
    description = "Upserts a film keyed on its upstream catalog id, along with its cast. \
        Re-running an import updates fields in place and never duplicates rows. \
        Reserved for the import job: the request must carry the configured import \
        token as a bearer credential.",
    request_body = ImportFilmRequest,
    responses(
        (status = 201, description = "Film imported", body = FilmResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Missing or wrong import token (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, headers, payload), fields(ghibli_id = %payload.ghibli_id))]
pub async fn import_film(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(payload): AppJson<ImportFilmRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_import_token(&headers, &state.config.import.token)?;
    validate_import_film(&payload)?;

    let txn = state.db.begin().await?;

    let new_film = film::ActiveModel {
        ghibli_id: Set(payload.ghibli_id.clone()),
        title: Set(payload.title),
        original_title: Set(payload.original_title),
        description: Set(payload.description),
        director: Set(payload.director),
        producer: Set(payload.producer),
        release_date: Set(payload.release_date),
        running_time: Set(payload.running_time),
        rt_score: Set(payload.rt_score),
        image: Set(payload.image),
        ..Default::default()
    };

    film::Entity::insert(new_film)
        .on_conflict(
            OnConflict::column(film::Column::GhibliId)
                .update_columns([
                    film::Column::Title,
                    film::Column::OriginalTitle,
                    film::Column::Description,
                    film::Column::Director,
                    film::Column::Producer,
                    film::Column::ReleaseDate,
                    film::Column::RunningTime,
                    film::Column::RtScore,
                    film::Column::Image,
                ])
                .to_owned(),
        )
        .exec_without_returning(&txn)
        .await?;

    let saved = film::Entity::find()
        .filter(film::Column::GhibliId.eq(&payload.ghibli_id))
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::Internal("film missing after upsert".into()))?;

    for p in payload.people {
        let new_person = person::ActiveModel {
            ghibli_id: Set(p.ghibli_id.clone()),
            name: Set(p.name),
            gender: Set(p.gender),
            age: Set(p.age),
            eye_color: Set(p.eye_color),
            hair_color: Set(p.hair_color),
            ..Default::default()
        };

        person::Entity::insert(new_person)
            .on_conflict(
                OnConflict::column(person::Column::GhibliId)
                    .update_columns([
                        person::Column::Name,
                        person::Column::Gender,
                        person::Column::Age,
                        person::Column::EyeColor,
                        person::Column::HairColor,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&txn)
            .await?;

        let saved_person = person::Entity::find()
            .filter(person::Column::GhibliId.eq(&p.ghibli_id))
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::Internal("person missing after upsert".into()))?;

        let link = film_person::ActiveModel {
            film_id: Set(saved.id),
            person_id: Set(saved_person.id),
        };
        let res = film_person::Entity::insert(link)
            .on_conflict(
                OnConflict::columns([film_person::Column::FilmId, film_person::Column::PersonId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&txn)
            .await;
        match res {
            Ok(_) | Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e.into()),
        }
    }

    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(FilmResponse::from(saved))))
}

/// The import surface authenticates with a static shared token, not a
/// user session.
fn require_import_token(headers: &HeaderMap, expected: &str) -> Result<(), AppError> {
    let auth_header = headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::TokenMissing)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AppError::TokenInvalid)?;

    if token != expected {
        return Err(AppError::TokenInvalid);
    }
    Ok(())
}

async fn find_film<C: ConnectionTrait>(db: &C, id: i32) -> Result<film::Model, AppError> {
    film::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Film not found".into()))
}

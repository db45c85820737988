use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;
use sea_orm::*;
use tracing::instrument;

use crate::entity::film;
use crate::error::AppError;
use crate::models::director::{DirectorFilmRef, DirectorResponse};
use crate::state::AppState;
use crate::utils::directors;

#[utoipa::path(
    get,
    path = "/api/v1/directors",
    tag = "Directors",
    operation_id = "listDirectors",
    summary = "List directors",
    description = "Aggregates the catalog by director. Directors are not stored; each \
        entry is derived from the films carrying that director name, enriched with a \
        Japanese name, a biography and a portrait path, and sorted by film count \
        descending. No authentication required.",
    responses(
        (status = 200, description = "Directors with their filmographies", body = Vec<DirectorResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_directors(
    State(state): State<AppState>,
) -> Result<Json<Vec<DirectorResponse>>, AppError> {
    let films = film::Entity::find()
        .order_by_desc(film::Column::ReleaseDate)
        .all(&state.db)
        .await?;

    // BTreeMap keeps same-count directors in a stable alphabetical order.
    let mut grouped: BTreeMap<String, Vec<DirectorFilmRef>> = BTreeMap::new();
    for f in films {
        grouped.entry(f.director.clone()).or_default().push(DirectorFilmRef {
            id: f.id,
            title: f.title,
            release_date: f.release_date,
        });
    }

    let mut result: Vec<DirectorResponse> = grouped
        .into_iter()
        .map(|(name, films)| DirectorResponse {
            japanese: directors::japanese_name(&name).to_string(),
            films_count: films.len(),
            image: directors::portrait_path(&name),
            bio: directors::biography(&name).to_string(),
            name,
            films,
        })
        .collect();

    result.sort_by(|a, b| b.films_count.cmp(&a.films_count));

    Ok(Json(result))
}

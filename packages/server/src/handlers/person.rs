use std::collections::HashMap;

use axum::Json;
use axum::extract::{Query, State};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{film, film_person, person};
use crate::error::AppError;
use crate::models::person::{PeopleListResponse, PersonFilmRef, PersonResponse};
use crate::models::shared::{PageQuery, Pagination};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/people",
    tag = "People",
    operation_id = "listPeople",
    summary = "List characters",
    description = "Returns a page of characters in alphabetical order, each with the \
        films they appear in. No authentication required.",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of characters", body = PeopleListResponse),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_people(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PeopleListResponse>, AppError> {
    let (page, limit) = query.resolve(20);

    let select = person::Entity::find().order_by_asc(person::Column::Name);

    let total = select.clone().paginate(&state.db, limit).num_items().await?;
    let total_pages = total.div_ceil(limit);

    let people_page = select
        .offset(Some(page.saturating_sub(1).saturating_mul(limit)))
        .limit(Some(limit))
        .all(&state.db)
        .await?;

    let person_ids: Vec<i32> = people_page.iter().map(|p| p.id).collect();
    let mut films_by_person = films_for_people(&state.db, &person_ids).await?;

    let people = people_page
        .into_iter()
        .map(|p| {
            let films = films_by_person.remove(&p.id).unwrap_or_default();
            PersonResponse::new(p, films)
        })
        .collect();

    Ok(Json(PeopleListResponse {
        people,
        pagination: Pagination {
            page,
            limit,
            total,
            total_pages,
        },
    }))
}

/// Resolve film references for a page of people in two queries instead
/// of one per person.
async fn films_for_people<C: ConnectionTrait>(
    db: &C,
    person_ids: &[i32],
) -> Result<HashMap<i32, Vec<PersonFilmRef>>, AppError> {
    let mut by_person: HashMap<i32, Vec<PersonFilmRef>> = HashMap::new();
    if person_ids.is_empty() {
        return Ok(by_person);
    }

    let links = film_person::Entity::find()
        .filter(film_person::Column::PersonId.is_in(person_ids.iter().copied()))
        .all(db)
        .await?;

    let film_ids: Vec<i32> = links.iter().map(|l| l.film_id).collect();
    let films: HashMap<i32, film::Model> = film::Entity::find()
        .filter(film::Column::Id.is_in(film_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|f| (f.id, f))
        .collect();

    for link in links {
        if let Some(f) = films.get(&link.film_id) {
            by_person
                .entry(link.person_id)
                .or_default()
                .push(PersonFilmRef::from(f.clone()));
        }
    }

    Ok(by_person)
}

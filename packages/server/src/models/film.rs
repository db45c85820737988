use serde::{Deserialize, Serialize};

use crate::entity::{film, person};
use crate::error::AppError;

use super::shared::Pagination;

/// Film fields exposed to the catalog (everything but relations).
#[derive(Serialize, utoipa::ToSchema)]
pub struct FilmResponse {
    pub id: i32,
    pub ghibli_id: String,
    pub title: String,
    pub original_title: String,
    pub description: String,
    pub director: String,
    pub producer: String,
    pub release_date: String,
    pub running_time: String,
    pub rt_score: String,
    pub image: Option<String>,
}

impl From<film::Model> for FilmResponse {
    fn from(m: film::Model) -> Self {
        Self {
            id: m.id,
            ghibli_id: m.ghibli_id,
            title: m.title,
            original_title: m.original_title,
            description: m.description,
            director: m.director,
            producer: m.producer,
            release_date: m.release_date,
            running_time: m.running_time,
            rt_score: m.rt_score,
            image: m.image,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct FilmListResponse {
    pub films: Vec<FilmResponse>,
    pub pagination: Pagination,
}

/// Cast member projection nested under a film detail.
#[derive(Serialize, utoipa::ToSchema)]
pub struct CastMember {
    pub id: i32,
    pub name: String,
    pub gender: Option<String>,
    pub age: Option<String>,
    pub eye_color: Option<String>,
    pub hair_color: Option<String>,
}

impl From<person::Model> for CastMember {
    fn from(m: person::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            gender: m.gender,
            age: m.age,
            eye_color: m.eye_color,
            hair_color: m.hair_color,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct FilmDetail {
    #[serde(flatten)]
    pub film: FilmResponse,
    pub people: Vec<CastMember>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct FilmDetailResponse {
    pub film: FilmDetail,
}

/// One film as submitted by the external import job. Upserted on
/// `ghibli_id`, so re-imports update rather than duplicate.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct ImportFilmRequest {
    pub ghibli_id: String,
    pub title: String,
    pub original_title: String,
    pub description: String,
    pub director: String,
    pub producer: String,
    pub release_date: String,
    pub running_time: String,
    pub rt_score: String,
    pub image: Option<String>,
    /// Cast; each person is upserted on their own `ghibli_id`.
    #[serde(default)]
    pub people: Vec<ImportPersonRequest>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct ImportPersonRequest {
    pub ghibli_id: String,
    pub name: String,
    pub gender: Option<String>,
    pub age: Option<String>,
    pub eye_color: Option<String>,
    pub hair_color: Option<String>,
}

pub fn validate_import_film(payload: &ImportFilmRequest) -> Result<(), AppError> {
    if payload.ghibli_id.trim().is_empty() {
        return Err(AppError::Validation("ghibli_id must not be empty".into()));
    }
    if payload.title.trim().is_empty() {
        return Err(AppError::Validation("Title must not be empty".into()));
    }
    for person in &payload.people {
        if person.ghibli_id.trim().is_empty() || person.name.trim().is_empty() {
            return Err(AppError::Validation(
                "Each person needs a ghibli_id and a name".into(),
            ));
        }
    }
    Ok(())
}

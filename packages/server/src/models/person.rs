use serde::Serialize;

use crate::entity::{film, person};

use super::shared::Pagination;

/// Minimal film projection attached to each person in the character list.
#[derive(Serialize, utoipa::ToSchema)]
pub struct PersonFilmRef {
    pub id: i32,
    pub title: String,
    pub image: Option<String>,
}

impl From<film::Model> for PersonFilmRef {
    fn from(m: film::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            image: m.image,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct PersonResponse {
    pub id: i32,
    pub ghibli_id: String,
    pub name: String,
    pub gender: Option<String>,
    pub age: Option<String>,
    pub eye_color: Option<String>,
    pub hair_color: Option<String>,
    pub films: Vec<PersonFilmRef>,
}

impl PersonResponse {
    pub fn new(m: person::Model, films: Vec<PersonFilmRef>) -> Self {
        Self {
            id: m.id,
            ghibli_id: m.ghibli_id,
            name: m.name,
            gender: m.gender,
            age: m.age,
            eye_color: m.eye_color,
            hair_color: m.hair_color,
            films,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct PeopleListResponse {
    pub people: Vec<PersonResponse>,
    pub pagination: Pagination,
}

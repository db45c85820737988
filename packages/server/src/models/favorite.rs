use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::film;

/// Request body for the favorite toggle.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct ToggleFavoriteRequest {
    pub film_id: i32,
}

/// Toggle and check responses both reduce to this single flag.
#[derive(Serialize, utoipa::ToSchema)]
pub struct FavoriteStatusResponse {
    /// Whether the film is in the caller's favorites after the operation.
    #[serde(rename = "isFavorite")]
    pub is_favorite: bool,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct FavoriteCheckQuery {
    pub film_id: i32,
}

/// Minimal film projection attached to each favorites-list entry.
#[derive(Serialize, utoipa::ToSchema)]
pub struct FavoriteFilmRef {
    pub id: i32,
    pub title: String,
    pub image: Option<String>,
    pub release_date: String,
    pub rt_score: String,
    pub director: String,
}

impl From<film::Model> for FavoriteFilmRef {
    fn from(m: film::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            image: m.image,
            release_date: m.release_date,
            rt_score: m.rt_score,
            director: m.director,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct FavoriteItem {
    pub film_id: i32,
    pub created_at: DateTime<Utc>,
    pub film: FavoriteFilmRef,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct FavoritesListResponse {
    pub favorites: Vec<FavoriteItem>,
}

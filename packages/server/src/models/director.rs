use serde::Serialize;

/// Film reference inside a director aggregate.
#[derive(Serialize, utoipa::ToSchema)]
pub struct DirectorFilmRef {
    pub id: i32,
    pub title: String,
    pub release_date: String,
}

/// One director, derived by grouping films; never stored.
#[derive(Serialize, utoipa::ToSchema)]
pub struct DirectorResponse {
    #[schema(example = "Hayao Miyazaki")]
    pub name: String,
    /// Japanese display name; empty for directors outside the known set.
    #[schema(example = "宮崎駿")]
    pub japanese: String,
    pub films_count: usize,
    /// Synthesized portrait path under `/images/directors/`.
    #[schema(example = "/images/directors/hayao-miyazaki.jpg")]
    pub image: String,
    pub bio: String,
    pub films: Vec<DirectorFilmRef>,
}

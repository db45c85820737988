use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "film")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Upstream catalog identifier. The import job upserts on this key,
    /// so re-running an import never duplicates a film.
    #[sea_orm(unique)]
    pub ghibli_id: String,

    pub title: String,
    pub original_title: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub director: String,
    pub producer: String,

    /// Release year as the upstream catalog reports it (e.g. "2001").
    pub release_date: String,
    pub running_time: String,
    pub rt_score: String,

    pub image: Option<String>,

    #[sea_orm(has_many, via = "film_person")]
    pub people: HasMany<super::person::Entity>,

    #[sea_orm(has_many)]
    pub favorites: HasMany<super::favorite::Entity>,

    #[sea_orm(has_many)]
    pub reviews: HasMany<super::review::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}

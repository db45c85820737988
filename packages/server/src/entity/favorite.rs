use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A user's favorite film. The composite primary key is the store-level
/// guarantee that a (user, film) pair is favorited at most once, even
/// under concurrent duplicate toggle requests.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "favorite")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub user_id: i32,
    #[sea_orm(primary_key)]
    pub film_id: i32,

    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub user: Option<super::user::Entity>,
    #[sea_orm(belongs_to, from = "film_id", to = "id")]
    pub film: Option<super::film::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

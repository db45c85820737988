use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A star rating with an optional comment. At most one review exists per
/// (user, film); the unique index enforcing that is created by
/// `seed::ensure_indexes`, and writes go through `ON CONFLICT ... DO UPDATE`.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "review")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub user_id: i32,
    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub user: HasOne<super::user::Entity>,

    pub film_id: i32,
    #[sea_orm(belongs_to, from = "film_id", to = "id")]
    pub film: HasOne<super::film::Entity>,

    /// Integer star rating, 1 to 10 inclusive.
    pub rating: i32,

    /// Sanitized free text, at most 500 characters.
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

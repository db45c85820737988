use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    /// Stored lowercase; lookups are case-normalized before querying.
    #[sea_orm(unique)]
    pub email: String,

    /// Argon2 hash. NULL for accounts created through a delegated
    /// identity provider, which never have a local password.
    pub password: Option<String>,

    /// Avatar URL, served from the media store.
    pub image: Option<String>,

    #[sea_orm(has_many)]
    pub favorites: HasMany<super::favorite::Entity>,

    #[sea_orm(has_many)]
    pub reviews: HasMany<super::review::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

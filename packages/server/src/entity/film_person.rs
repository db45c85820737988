use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "film_person")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub film_id: i32,
    #[sea_orm(primary_key)]
    pub person_id: i32,

    #[sea_orm(belongs_to, from = "film_id", to = "id")]
    pub film: Option<super::film::Entity>,
    #[sea_orm(belongs_to, from = "person_id", to = "id")]
    pub person: Option<super::person::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}

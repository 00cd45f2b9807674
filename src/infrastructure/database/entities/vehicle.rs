//! Vehicle entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicles")]
pub struct Model {
    /// UUID
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub model: String,

    pub brand_id: i32,
    pub brand_name: String,

    pub type_id: i32,
    pub type_name: String,

    /// Normalised plate (upper-case, no whitespace)
    #[sea_orm(unique)]
    pub plate: String,

    pub color: String,
    pub owner_name: String,
    pub owner_contact: String,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::occupancy::Entity")]
    Occupancies,
}

impl Related<super::occupancy::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Occupancies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

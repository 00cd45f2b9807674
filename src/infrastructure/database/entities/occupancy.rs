//! Occupancy entity - a vehicle parked in a slot

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "occupancies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub slot_id: String,
    pub slot_code: String,

    pub vehicle_id: String,
    pub vehicle_plate: String,

    pub start_time: DateTimeUtc,

    #[sea_orm(nullable)]
    pub end_time: Option<DateTimeUtc>,

    /// Price per started hour (smallest currency unit)
    #[sea_orm(nullable)]
    pub hourly_rate: Option<i64>,

    /// Flat price (smallest currency unit)
    #[sea_orm(nullable)]
    pub fixed_rate: Option<i64>,

    pub total_price: i64,
    pub closed: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::slot::Entity",
        from = "Column::SlotId",
        to = "super::slot::Column::Id"
    )]
    Slot,
    #[sea_orm(
        belongs_to = "super::vehicle::Entity",
        from = "Column::VehicleId",
        to = "super::vehicle::Column::Id"
    )]
    Vehicle,
}

impl Related<super::slot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Slot.def()
    }
}

impl Related<super::vehicle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehicle.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

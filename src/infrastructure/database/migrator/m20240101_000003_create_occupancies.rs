//! Create occupancies table
//!
//! One row per vehicle currently parked. Rows are closed and then
//! removed when the slot is released.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_vehicles::Vehicles;
use super::m20240101_000002_create_slots::Slots;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Occupancies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Occupancies::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Occupancies::SlotId).string().not_null())
                    .col(ColumnDef::new(Occupancies::SlotCode).string().not_null())
                    .col(ColumnDef::new(Occupancies::VehicleId).string().not_null())
                    .col(ColumnDef::new(Occupancies::VehiclePlate).string().not_null())
                    .col(
                        ColumnDef::new(Occupancies::StartTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Occupancies::EndTime).timestamp_with_time_zone())
                    .col(ColumnDef::new(Occupancies::HourlyRate).big_integer())
                    .col(ColumnDef::new(Occupancies::FixedRate).big_integer())
                    .col(
                        ColumnDef::new(Occupancies::TotalPrice)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Occupancies::Closed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_occupancies_slot")
                            .from(Occupancies::Table, Occupancies::SlotId)
                            .to(Slots::Table, Slots::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_occupancies_vehicle")
                            .from(Occupancies::Table, Occupancies::VehicleId)
                            .to(Vehicles::Table, Vehicles::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_occupancies_slot")
                    .table(Occupancies::Table)
                    .col(Occupancies::SlotId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_occupancies_vehicle")
                    .table(Occupancies::Table)
                    .col(Occupancies::VehicleId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_occupancies_closed")
                    .table(Occupancies::Table)
                    .col(Occupancies::Closed)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Occupancies::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Occupancies {
    Table,
    Id,
    SlotId,
    SlotCode,
    VehicleId,
    VehiclePlate,
    StartTime,
    EndTime,
    HourlyRate,
    FixedRate,
    TotalPrice,
    Closed,
}

//! At most one open occupancy per slot and per vehicle
//!
//! Partial unique indexes over rows with `closed = false`. Closed rows
//! waiting for deletion are not covered.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS ux_occupancies_open_slot \
             ON occupancies (slot_id) WHERE NOT closed",
        )
        .await?;
        db.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS ux_occupancies_open_vehicle \
             ON occupancies (vehicle_id) WHERE NOT closed",
        )
        .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP INDEX IF EXISTS ux_occupancies_open_vehicle")
            .await?;
        db.execute_unprepared("DROP INDEX IF EXISTS ux_occupancies_open_slot")
            .await?;
        Ok(())
    }
}

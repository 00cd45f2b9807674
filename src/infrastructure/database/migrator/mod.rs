//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_vehicles;
mod m20240101_000002_create_slots;
mod m20240101_000003_create_occupancies;
mod m20240101_000004_unique_open_occupancies;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_vehicles::Migration),
            Box::new(m20240101_000002_create_slots::Migration),
            Box::new(m20240101_000003_create_occupancies::Migration),
            Box::new(m20240101_000004_unique_open_occupancies::Migration),
        ]
    }
}

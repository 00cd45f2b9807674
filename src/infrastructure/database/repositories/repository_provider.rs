//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::occupancy::OccupancyRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::slot::SlotRepository;
use crate::domain::vehicle::VehicleRepository;

use super::occupancy_repository::SeaOrmOccupancyRepository;
use super::slot_repository::SeaOrmSlotRepository;
use super::vehicle_repository::SeaOrmVehicleRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let slot = repos.slots().find_by_code("A01").await?;
/// let open = repos.occupancies().find_open_for_slot(&slot.id).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    vehicles: SeaOrmVehicleRepository,
    slots: SeaOrmSlotRepository,
    occupancies: SeaOrmOccupancyRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            vehicles: SeaOrmVehicleRepository::new(db.clone()),
            slots: SeaOrmSlotRepository::new(db.clone()),
            occupancies: SeaOrmOccupancyRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn vehicles(&self) -> &dyn VehicleRepository {
        &self.vehicles
    }

    fn slots(&self) -> &dyn SlotRepository {
        &self.slots
    }

    fn occupancies(&self) -> &dyn OccupancyRepository {
        &self.occupancies
    }
}

//! In-memory storage implementation

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::occupancy::{OccupancyRecord, OccupancyRepository};
use crate::domain::slot::{Slot, SlotRepository};
use crate::domain::vehicle::{Vehicle, VehicleRepository};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

/// In-memory vehicle directory
#[derive(Default)]
pub struct InMemoryVehicleRepository {
    vehicles: DashMap<String, Vehicle>,
}

#[async_trait]
impl VehicleRepository for InMemoryVehicleRepository {
    async fn find_all(&self) -> DomainResult<Vec<Vehicle>> {
        let mut all: Vec<Vehicle> = self.vehicles.iter().map(|v| v.value().clone()).collect();
        all.sort_by(|a, b| a.plate.cmp(&b.plate));
        Ok(all)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Vehicle>> {
        Ok(self.vehicles.get(id).map(|v| v.value().clone()))
    }

    async fn find_by_plate(&self, plate: &str) -> DomainResult<Option<Vehicle>> {
        Ok(self
            .vehicles
            .iter()
            .find(|v| v.plate == plate)
            .map(|v| v.value().clone()))
    }

    async fn save(&self, vehicle: Vehicle) -> DomainResult<()> {
        if self.vehicles.contains_key(&vehicle.id) {
            return Err(DomainError::Conflict(format!("vehicle {}", vehicle.id)));
        }
        self.vehicles.insert(vehicle.id.clone(), vehicle);
        Ok(())
    }

    async fn update(&self, vehicle: Vehicle) -> DomainResult<()> {
        match self.vehicles.get_mut(&vehicle.id) {
            Some(mut entry) => {
                *entry = vehicle;
                Ok(())
            }
            None => Err(DomainError::not_found("Vehicle", "id", &vehicle.id)),
        }
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.vehicles
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("Vehicle", "id", id))
    }
}

/// In-memory slot directory
#[derive(Default)]
pub struct InMemorySlotRepository {
    slots: DashMap<String, Slot>,
}

#[async_trait]
impl SlotRepository for InMemorySlotRepository {
    async fn find_all(&self) -> DomainResult<Vec<Slot>> {
        let mut all: Vec<Slot> = self.slots.iter().map(|s| s.value().clone()).collect();
        all.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(all)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Slot>> {
        Ok(self.slots.get(id).map(|s| s.value().clone()))
    }

    async fn find_by_code(&self, code: &str) -> DomainResult<Option<Slot>> {
        Ok(self
            .slots
            .iter()
            .find(|s| s.code == code)
            .map(|s| s.value().clone()))
    }

    async fn save(&self, slot: Slot) -> DomainResult<()> {
        if self.slots.contains_key(&slot.id) {
            return Err(DomainError::Conflict(format!("slot {}", slot.id)));
        }
        self.slots.insert(slot.id.clone(), slot);
        Ok(())
    }

    async fn update(&self, slot: Slot) -> DomainResult<()> {
        match self.slots.get_mut(&slot.id) {
            Some(mut entry) => {
                *entry = slot;
                Ok(())
            }
            None => Err(DomainError::not_found("Slot", "id", &slot.id)),
        }
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.slots
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("Slot", "id", id))
    }

    async fn count_active(&self) -> DomainResult<u64> {
        Ok(self.slots.iter().filter(|s| s.active).count() as u64)
    }
}

/// In-memory occupancy directory
pub struct InMemoryOccupancyRepository {
    records: DashMap<i32, OccupancyRecord>,
    counter: AtomicI32,
    /// Serialises the open-record check with the insert in `save`
    insert_lock: Mutex<()>,
}

impl Default for InMemoryOccupancyRepository {
    fn default() -> Self {
        Self {
            records: DashMap::new(),
            counter: AtomicI32::new(1),
            insert_lock: Mutex::new(()),
        }
    }
}

impl InMemoryOccupancyRepository {
    fn open_matching(&self, pred: impl Fn(&OccupancyRecord) -> bool) -> Option<OccupancyRecord> {
        self.records
            .iter()
            .find(|r| r.is_open() && pred(r.value()))
            .map(|r| r.value().clone())
    }
}

#[async_trait]
impl OccupancyRepository for InMemoryOccupancyRepository {
    async fn save(&self, mut record: OccupancyRecord) -> DomainResult<OccupancyRecord> {
        let _lock = self
            .insert_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if record.is_open() {
            if self.open_matching(|r| r.slot_id == record.slot_id).is_some() {
                return Err(DomainError::Conflict(format!(
                    "slot {} already has an open occupancy",
                    record.slot_code
                )));
            }
            if self.open_matching(|r| r.vehicle_id == record.vehicle_id).is_some() {
                return Err(DomainError::Conflict(format!(
                    "vehicle {} already has an open occupancy",
                    record.vehicle_plate
                )));
            }
        }
        record.id = self.counter.fetch_add(1, Ordering::SeqCst);
        self.records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<OccupancyRecord>> {
        Ok(self.records.get(&id).map(|r| r.value().clone()))
    }

    async fn update(&self, record: OccupancyRecord) -> DomainResult<()> {
        match self.records.get_mut(&record.id) {
            Some(mut entry) => {
                *entry = record;
                Ok(())
            }
            None => Err(DomainError::not_found("Occupancy", "id", record.id)),
        }
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        self.records
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("Occupancy", "id", id))
    }

    async fn find_open(&self) -> DomainResult<Vec<OccupancyRecord>> {
        let mut open: Vec<OccupancyRecord> = self
            .records
            .iter()
            .filter(|r| r.is_open())
            .map(|r| r.value().clone())
            .collect();
        open.sort_by_key(|r| (r.start_time, r.id));
        Ok(open)
    }

    async fn find_open_for_slot(&self, slot_id: &str) -> DomainResult<Option<OccupancyRecord>> {
        Ok(self.open_matching(|r| r.slot_id == slot_id))
    }

    async fn find_open_for_vehicle(
        &self,
        vehicle_id: &str,
    ) -> DomainResult<Option<OccupancyRecord>> {
        Ok(self.open_matching(|r| r.vehicle_id == vehicle_id))
    }

    async fn count_open(&self) -> DomainResult<u64> {
        Ok(self.records.iter().filter(|r| r.is_open()).count() as u64)
    }
}

/// In-memory storage for development and testing
#[derive(Default)]
pub struct InMemoryRepositoryProvider {
    vehicles: InMemoryVehicleRepository,
    slots: InMemorySlotRepository,
    occupancies: InMemoryOccupancyRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
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

// ── Tests ──────────────────────────────────────────────────────

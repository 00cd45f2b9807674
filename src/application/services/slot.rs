//! Slot directory service and occupancy percentage

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::application::events::{Event, OccupancyChangedEvent, SharedEventBus};
use crate::domain::{DomainError, DomainResult, OccupancyStats, RepositoryProvider, Slot};

/// Fields supplied when registering or editing a slot
#[derive(Debug, Clone)]
pub struct SlotDraft {
    pub code: String,
    pub covered: bool,
    pub truck_capable: bool,
    pub active: bool,
    pub reserved: bool,
}

impl SlotDraft {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            covered: false,
            truck_capable: true,
            active: true,
            reserved: false,
        }
    }
}

pub struct SlotService {
    repos: Arc<dyn RepositoryProvider>,
    event_bus: SharedEventBus,
    stats: RwLock<OccupancyStats>,
}

impl SlotService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, event_bus: SharedEventBus) -> Self {
        Self {
            repos,
            event_bus,
            stats: RwLock::new(OccupancyStats::default()),
        }
    }

    pub async fn list(&self) -> DomainResult<Vec<Slot>> {
        self.repos.slots().find_all().await
    }

    pub async fn get(&self, id: &str) -> DomainResult<Slot> {
        self.repos
            .slots()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Slot", "id", id))
    }

    pub async fn create(&self, draft: SlotDraft) -> DomainResult<Slot> {
        let mut slot = Slot::new(&draft.code);
        slot.covered = draft.covered;
        slot.truck_capable = draft.truck_capable;
        slot.active = draft.active;
        slot.reserved = draft.reserved;

        slot.validate()?;
        self.ensure_code_free(&slot.code, None).await?;

        self.repos.slots().save(slot.clone()).await?;
        info!(slot_id = slot.id.as_str(), code = slot.code.as_str(), "Slot registered");

        self.recalculate_occupancy().await?;
        Ok(slot)
    }

    pub async fn update(&self, id: &str, draft: SlotDraft) -> DomainResult<Slot> {
        let mut slot = self.get(id).await?;
        slot.code = draft.code.trim().to_string();
        slot.covered = draft.covered;
        slot.truck_capable = draft.truck_capable;
        slot.active = draft.active;
        slot.reserved = draft.reserved;
        slot.updated_at = Utc::now();

        slot.validate()?;
        self.ensure_code_free(&slot.code, Some(id)).await?;

        self.repos.slots().update(slot.clone()).await?;
        info!(slot_id = id, code = slot.code.as_str(), active = slot.active, "Slot updated");

        self.recalculate_occupancy().await?;
        Ok(slot)
    }

    pub async fn delete(&self, id: &str) -> DomainResult<()> {
        let slot = self.get(id).await?;
        if self
            .repos
            .occupancies()
            .find_open_for_slot(id)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(format!(
                "slot {} is currently occupied",
                slot.code
            )));
        }
        self.repos.slots().delete(id).await?;
        info!(slot_id = id, code = slot.code.as_str(), "Slot deleted");

        self.recalculate_occupancy().await?;
        Ok(())
    }

    /// Recompute the share of active slots holding an open record,
    /// cache it and broadcast the new value.
    pub async fn recalculate_occupancy(&self) -> DomainResult<OccupancyStats> {
        let total = self.repos.slots().count_active().await?;
        let occupied = self.repos.occupancies().count_open().await?;
        let stats = OccupancyStats::compute(total, occupied);

        *self.stats.write().await = stats;

        metrics::gauge!("parking_occupancy_percent").set(stats.percentage);
        debug!(
            total_slots = stats.total_slots,
            occupied_slots = stats.occupied_slots,
            percentage = stats.percentage,
            "Occupancy recalculated"
        );

        self.event_bus
            .publish(Event::OccupancyChanged(OccupancyChangedEvent {
                total_slots: stats.total_slots,
                occupied_slots: stats.occupied_slots,
                percentage: stats.percentage,
                timestamp: Utc::now(),
            }));

        Ok(stats)
    }

    /// Last computed occupancy
    pub async fn occupancy(&self) -> OccupancyStats {
        *self.stats.read().await
    }

    async fn ensure_code_free(&self, code: &str, own_id: Option<&str>) -> DomainResult<()> {
        match self.repos.slots().find_by_code(code).await? {
            Some(existing) if Some(existing.id.as_str()) != own_id => Err(DomainError::Conflict(
                format!("a slot with code {} already exists", code),
            )),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::events::create_event_bus;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    fn service() -> SlotService {
        SlotService::new(Arc::new(InMemoryRepositoryProvider::new()), create_event_bus())
    }

    #[tokio::test]
    async fn create_applies_defaults_and_updates_stats() {
        let svc = service();
        let slot = svc.create(SlotDraft::new(" A01 ")).await.unwrap();
        assert_eq!(slot.code, "A01");
        assert!(slot.active);
        assert!(slot.truck_capable);

        let stats = svc.occupancy().await;
        assert_eq!(stats.total_slots, 1);
        assert_eq!(stats.percentage, 0.0);
    }

    #[tokio::test]
    async fn duplicate_code_is_conflict() {
        let svc = service();
        svc.create(SlotDraft::new("A01")).await.unwrap();
        assert!(matches!(
            svc.create(SlotDraft::new("A01")).await,
            Err(DomainError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn inactive_slots_are_not_counted() {
        let svc = service();
        svc.create(SlotDraft::new("A01")).await.unwrap();
        let mut inactive = SlotDraft::new("A02");
        inactive.active = false;
        svc.create(inactive).await.unwrap();

        assert_eq!(svc.recalculate_occupancy().await.unwrap().total_slots, 1);
    }

    #[tokio::test]
    async fn recalculation_is_broadcast() {
        let bus = create_event_bus();
        let svc = SlotService::new(Arc::new(InMemoryRepositoryProvider::new()), bus.clone());
        let mut sub = bus.subscribe();

        svc.recalculate_occupancy().await.unwrap();
        let msg = sub.recv().await.unwrap();
        assert_eq!(msg.event.event_type(), "occupancy_changed");
    }

    #[tokio::test]
    async fn delete_removes_slot() {
        let svc = service();
        let slot = svc.create(SlotDraft::new("A01")).await.unwrap();
        svc.delete(&slot.id).await.unwrap();
        assert!(svc.list().await.unwrap().is_empty());
        assert_eq!(svc.occupancy().await.total_slots, 0);
    }
}

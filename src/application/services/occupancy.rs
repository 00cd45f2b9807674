//! Parking and releasing vehicles
//!
//! `park` assigns a free vehicle to a free active slot under the pricing
//! accepted by the rate form. `release` closes the record, bills it,
//! folds the amount into the revenue ledger and frees the slot.

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use tracing::{info, warn};

use super::revenue::{RevenueLedger, RevenueSnapshot};
use super::slot::SlotService;
use crate::application::events::{Event, SharedEventBus, SlotReleasedEvent, VehicleParkedEvent};
use crate::domain::{
    BillingPolicy, DomainError, DomainResult, OccupancyRecord, RateForm, RepositoryProvider, Slot,
    Vehicle,
};

/// Input for assigning a vehicle to a slot
#[derive(Debug, Clone, Default)]
pub struct ParkRequest {
    pub vehicle_id: String,
    pub slot_id: String,
    pub hourly_rate: Option<i64>,
    pub fixed_rate: Option<i64>,
    /// Defaults to now
    pub start_time: Option<DateTime<Utc>>,
}

/// Outcome of a release
#[derive(Debug, Clone)]
pub struct ReleaseReceipt {
    pub record: OccupancyRecord,
    /// `None` for fixed pricing
    pub billed_hours: Option<i64>,
    pub total_price: i64,
    pub currency: String,
}

/// Running revenue with its currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Revenue {
    pub total: i64,
    pub closed_records: u64,
    pub currency: String,
}

/// Vehicles and slots that can take part in a new occupancy
#[derive(Debug, Clone)]
pub struct Availability {
    pub vehicles: Vec<Vehicle>,
    pub slots: Vec<Slot>,
}

/// Holds a key in an in-flight set until dropped
struct InFlight<'a, K: Eq + Hash> {
    set: &'a DashMap<K, ()>,
    key: K,
}

impl<'a, K: Eq + Hash + Clone> InFlight<'a, K> {
    /// `None` when another task already holds `key`
    fn claim(set: &'a DashMap<K, ()>, key: K) -> Option<Self> {
        if set.insert(key.clone(), ()).is_some() {
            return None;
        }
        Some(Self { set, key })
    }
}

impl<K: Eq + Hash> Drop for InFlight<'_, K> {
    fn drop(&mut self) {
        self.set.remove(&self.key);
    }
}

pub struct OccupancyService {
    repos: Arc<dyn RepositoryProvider>,
    slots: Arc<SlotService>,
    event_bus: SharedEventBus,
    ledger: Arc<RevenueLedger>,
    policy: BillingPolicy,
    currency: String,
    releasing: DashMap<i32, ()>,
    parking_slots: DashMap<String, ()>,
    parking_vehicles: DashMap<String, ()>,
}

impl OccupancyService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        slots: Arc<SlotService>,
        event_bus: SharedEventBus,
        ledger: Arc<RevenueLedger>,
        policy: BillingPolicy,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            repos,
            slots,
            event_bus,
            ledger,
            policy,
            currency: currency.into(),
            releasing: DashMap::new(),
            parking_slots: DashMap::new(),
            parking_vehicles: DashMap::new(),
        }
    }

    pub fn policy(&self) -> &BillingPolicy {
        &self.policy
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub async fn list_open(&self) -> DomainResult<Vec<OccupancyRecord>> {
        self.repos.occupancies().find_open().await
    }

    pub async fn get(&self, id: i32) -> DomainResult<OccupancyRecord> {
        self.repos
            .occupancies()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Occupancy", "id", id))
    }

    /// Vehicles without an open record
    pub async fn available_vehicles(&self) -> DomainResult<Vec<Vehicle>> {
        let open = self.repos.occupancies().find_open().await?;
        let parked: HashSet<&str> = open.iter().map(|r| r.vehicle_id.as_str()).collect();
        let vehicles = self.repos.vehicles().find_all().await?;
        Ok(vehicles
            .into_iter()
            .filter(|v| !parked.contains(v.id.as_str()))
            .collect())
    }

    /// Active slots without an open record
    pub async fn available_slots(&self) -> DomainResult<Vec<Slot>> {
        let open = self.repos.occupancies().find_open().await?;
        let taken: HashSet<&str> = open.iter().map(|r| r.slot_id.as_str()).collect();
        let slots = self.repos.slots().find_all().await?;
        Ok(slots
            .into_iter()
            .filter(|s| s.accepts_vehicles() && !taken.contains(s.id.as_str()))
            .collect())
    }

    pub async fn availability(&self) -> DomainResult<Availability> {
        Ok(Availability {
            vehicles: self.available_vehicles().await?,
            slots: self.available_slots().await?,
        })
    }

    pub async fn park(&self, request: ParkRequest) -> DomainResult<OccupancyRecord> {
        let pricing = RateForm::from_inputs(request.hourly_rate, request.fixed_rate)?.submit()?;

        let vehicle = self
            .repos
            .vehicles()
            .find_by_id(&request.vehicle_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Vehicle", "id", &request.vehicle_id))?;
        let slot = self
            .repos
            .slots()
            .find_by_id(&request.slot_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Slot", "id", &request.slot_id))?;

        if !slot.accepts_vehicles() {
            return Err(DomainError::Validation(format!(
                "slot {} is not active",
                slot.code
            )));
        }

        // held until the record is saved; storage enforces the same rule
        let _slot_claim = InFlight::claim(&self.parking_slots, slot.id.clone()).ok_or_else(|| {
            DomainError::Conflict(format!("slot {} is already being assigned", slot.code))
        })?;
        let _vehicle_claim = InFlight::claim(&self.parking_vehicles, vehicle.id.clone())
            .ok_or_else(|| {
                DomainError::Conflict(format!("vehicle {} is already being parked", vehicle.plate))
            })?;
        if self
            .repos
            .occupancies()
            .find_open_for_vehicle(&vehicle.id)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(format!(
                "vehicle {} is already parked",
                vehicle.plate
            )));
        }
        if self
            .repos
            .occupancies()
            .find_open_for_slot(&slot.id)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(format!(
                "slot {} is already occupied",
                slot.code
            )));
        }

        let start_time = request.start_time.unwrap_or_else(Utc::now);
        let record = OccupancyRecord::new(
            &slot.id,
            &slot.code,
            &vehicle.id,
            &vehicle.plate,
            start_time,
            pricing,
        );
        let record = self.repos.occupancies().save(record).await?;

        info!(
            occupancy_id = record.id,
            slot = record.slot_code.as_str(),
            plate = record.vehicle_plate.as_str(),
            pricing = %record.pricing,
            "Vehicle parked"
        );
        metrics::counter!("parking_vehicles_parked_total").increment(1);

        self.refresh_occupancy().await;
        self.event_bus.publish(Event::VehicleParked(VehicleParkedEvent {
            occupancy_id: record.id,
            slot_id: record.slot_id.clone(),
            slot_code: record.slot_code.clone(),
            vehicle_id: record.vehicle_id.clone(),
            vehicle_plate: record.vehicle_plate.clone(),
            start_time: record.start_time,
        }));

        Ok(record)
    }

    /// Close an open record at the current time and free its slot
    pub async fn release(&self, id: i32) -> DomainResult<ReleaseReceipt> {
        self.release_at(id, Utc::now()).await
    }

    /// Close an open record at `end_time` and free its slot.
    ///
    /// A record that is already closed but still stored was billed by an
    /// earlier release whose delete failed. It is removed without being
    /// billed again.
    pub async fn release_at(&self, id: i32, end_time: DateTime<Utc>) -> DomainResult<ReleaseReceipt> {
        let _guard = InFlight::claim(&self.releasing, id).ok_or_else(|| {
            DomainError::Conflict(format!("occupancy {} is already being released", id))
        })?;

        let mut record = self.get(id).await?;
        let total = match record.close(end_time, &self.policy) {
            Some(total) => {
                self.repos.occupancies().update(record.clone()).await?;
                self.ledger.record(total);
                total
            }
            None => {
                warn!(occupancy_id = id, "Removing occupancy closed by an earlier release");
                record.total_price
            }
        };
        let end_time = record.end_time.unwrap_or(end_time);

        self.refresh_occupancy().await;
        self.repos.occupancies().delete(id).await?;

        let billed_hours = self.policy.billed_hours_for(&record);
        info!(
            occupancy_id = id,
            slot = record.slot_code.as_str(),
            plate = record.vehicle_plate.as_str(),
            ?billed_hours,
            total_price = total,
            currency = self.currency.as_str(),
            "Slot released"
        );
        metrics::counter!("parking_slots_released_total").increment(1);

        self.event_bus.publish(Event::SlotReleased(SlotReleasedEvent {
            occupancy_id: id,
            slot_id: record.slot_id.clone(),
            slot_code: record.slot_code.clone(),
            vehicle_plate: record.vehicle_plate.clone(),
            end_time,
            total_price: total,
            currency: self.currency.clone(),
        }));

        Ok(ReleaseReceipt {
            record,
            billed_hours,
            total_price: total,
            currency: self.currency.clone(),
        })
    }

    pub fn revenue(&self) -> Revenue {
        let RevenueSnapshot {
            total,
            closed_records,
        } = self.ledger.snapshot();
        Revenue {
            total,
            closed_records,
            currency: self.currency.clone(),
        }
    }

    /// The record change is already committed; a failed recount only
    /// leaves the cached percentage stale until the next one.
    async fn refresh_occupancy(&self) {
        if let Err(e) = self.slots.recalculate_occupancy().await {
            warn!(error = %e, "Failed to recalculate occupancy");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::events::create_event_bus;
    use crate::application::services::{SlotDraft, VehicleDraft, VehicleService};
    use crate::domain::occupancy::OccupancyRepository;
    use crate::domain::slot::SlotRepository;
    use crate::domain::vehicle::VehicleRepository;
    use crate::domain::{Pricing, VehicleBrand, VehicleType};
    use crate::infrastructure::storage::InMemoryRepositoryProvider;
    use async_trait::async_trait;
    use chrono::Duration;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct Fixture {
        vehicles: VehicleService,
        slots: Arc<SlotService>,
        occupancies: Arc<OccupancyService>,
    }

    fn fixture_with_repos(repos: Arc<dyn RepositoryProvider>, policy: BillingPolicy) -> Fixture {
        let bus = create_event_bus();
        let slots = Arc::new(SlotService::new(repos.clone(), bus.clone()));
        Fixture {
            vehicles: VehicleService::new(repos.clone()),
            slots: slots.clone(),
            occupancies: Arc::new(OccupancyService::new(
                repos,
                slots,
                bus,
                Arc::new(RevenueLedger::new()),
                policy,
                "BRL",
            )),
        }
    }

    fn fixture_with_policy(policy: BillingPolicy) -> Fixture {
        fixture_with_repos(Arc::new(InMemoryRepositoryProvider::new()), policy)
    }

    /// In-memory storage whose occupancy deletes can be made to fail
    #[derive(Default)]
    struct FailingDeletes {
        inner: InMemoryRepositoryProvider,
        fail: AtomicBool,
    }

    #[async_trait]
    impl OccupancyRepository for FailingDeletes {
        async fn save(&self, record: OccupancyRecord) -> DomainResult<OccupancyRecord> {
            self.inner.occupancies().save(record).await
        }
        async fn find_by_id(&self, id: i32) -> DomainResult<Option<OccupancyRecord>> {
            self.inner.occupancies().find_by_id(id).await
        }
        async fn update(&self, record: OccupancyRecord) -> DomainResult<()> {
            self.inner.occupancies().update(record).await
        }
        async fn delete(&self, id: i32) -> DomainResult<()> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(DomainError::Storage("disk I/O error".into()));
            }
            self.inner.occupancies().delete(id).await
        }
        async fn find_open(&self) -> DomainResult<Vec<OccupancyRecord>> {
            self.inner.occupancies().find_open().await
        }
        async fn find_open_for_slot(&self, slot_id: &str) -> DomainResult<Option<OccupancyRecord>> {
            self.inner.occupancies().find_open_for_slot(slot_id).await
        }
        async fn find_open_for_vehicle(
            &self,
            vehicle_id: &str,
        ) -> DomainResult<Option<OccupancyRecord>> {
            self.inner.occupancies().find_open_for_vehicle(vehicle_id).await
        }
        async fn count_open(&self) -> DomainResult<u64> {
            self.inner.occupancies().count_open().await
        }
    }

    impl RepositoryProvider for FailingDeletes {
        fn vehicles(&self) -> &dyn VehicleRepository {
            self.inner.vehicles()
        }
        fn slots(&self) -> &dyn SlotRepository {
            self.inner.slots()
        }
        fn occupancies(&self) -> &dyn OccupancyRepository {
            self
        }
    }

    fn fixture() -> Fixture {
        fixture_with_policy(BillingPolicy::default())
    }

    fn vehicle_draft(plate: &str) -> VehicleDraft {
        VehicleDraft {
            model: "Uno".into(),
            brand: VehicleBrand {
                id: 2,
                name: "Fiat".into(),
            },
            kind: VehicleType {
                id: 1,
                name: "Car".into(),
            },
            plate: plate.into(),
            color: "White".into(),
            owner_name: "Joao Lima".into(),
            owner_contact: "21912345678".into(),
        }
    }

    async fn seed(f: &Fixture) -> (Vehicle, Slot) {
        let v = f.vehicles.create(vehicle_draft("XYZ9A88")).await.unwrap();
        let s = f.slots.create(SlotDraft::new("A01")).await.unwrap();
        (v, s)
    }

    fn request(v: &Vehicle, s: &Slot, hourly: Option<i64>, fixed: Option<i64>) -> ParkRequest {
        ParkRequest {
            vehicle_id: v.id.clone(),
            slot_id: s.id.clone(),
            hourly_rate: hourly,
            fixed_rate: fixed,
            start_time: None,
        }
    }

    #[tokio::test]
    async fn park_and_release_hourly() {
        let f = fixture();
        let (v, s) = seed(&f).await;

        let start = Utc::now() - Duration::hours(2);
        let mut req = request(&v, &s, Some(10), None);
        req.start_time = Some(start);
        let record = f.occupancies.park(req).await.unwrap();
        assert!(record.is_open());
        assert_eq!(f.slots.occupancy().await.percentage, 100.0);
        assert!(f.occupancies.available_slots().await.unwrap().is_empty());
        assert!(f.occupancies.available_vehicles().await.unwrap().is_empty());

        let receipt = f
            .occupancies
            .release_at(record.id, start + Duration::hours(2))
            .await
            .unwrap();
        assert_eq!(receipt.total_price, 20);
        assert_eq!(receipt.billed_hours, Some(2));
        assert!(receipt.record.closed);

        assert!(f.occupancies.list_open().await.unwrap().is_empty());
        assert_eq!(f.slots.occupancy().await.percentage, 0.0);
        assert_eq!(f.occupancies.revenue().total, 20);
        assert_eq!(f.occupancies.revenue().closed_records, 1);
    }

    #[tokio::test]
    async fn fixed_rate_ignores_duration() {
        let f = fixture();
        let (v, s) = seed(&f).await;
        let record = f
            .occupancies
            .park(request(&v, &s, None, Some(50)))
            .await
            .unwrap();
        assert_eq!(record.pricing, Pricing::Fixed(50));

        let receipt = f
            .occupancies
            .release_at(record.id, record.start_time + Duration::hours(7))
            .await
            .unwrap();
        assert_eq!(receipt.total_price, 50);
        assert_eq!(receipt.billed_hours, None);
    }

    #[tokio::test]
    async fn minimum_billed_hours_policy() {
        let f = fixture_with_policy(BillingPolicy::new(1));
        let (v, s) = seed(&f).await;
        let record = f
            .occupancies
            .park(request(&v, &s, Some(10), None))
            .await
            .unwrap();
        let receipt = f
            .occupancies
            .release_at(record.id, record.start_time)
            .await
            .unwrap();
        assert_eq!(receipt.total_price, 10);
    }

    #[tokio::test]
    async fn park_requires_a_rate() {
        let f = fixture();
        let (v, s) = seed(&f).await;
        let err = f
            .occupancies
            .park(request(&v, &s, None, None))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(f.occupancies.list_open().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn park_rejects_both_rates() {
        let f = fixture();
        let (v, s) = seed(&f).await;
        assert!(matches!(
            f.occupancies.park(request(&v, &s, Some(10), Some(50))).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn slot_and_vehicle_cannot_be_double_booked() {
        let f = fixture();
        let (v, s) = seed(&f).await;
        f.occupancies
            .park(request(&v, &s, Some(10), None))
            .await
            .unwrap();

        let other_vehicle = f.vehicles.create(vehicle_draft("AAA1111")).await.unwrap();
        let other_slot = f.slots.create(SlotDraft::new("A02")).await.unwrap();

        assert!(matches!(
            f.occupancies
                .park(request(&other_vehicle, &s, Some(10), None))
                .await,
            Err(DomainError::Conflict(_))
        ));
        assert!(matches!(
            f.occupancies
                .park(request(&v, &other_slot, Some(10), None))
                .await,
            Err(DomainError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn inactive_slot_is_rejected() {
        let f = fixture();
        let v = f.vehicles.create(vehicle_draft("XYZ9A88")).await.unwrap();
        let mut draft = SlotDraft::new("B01");
        draft.active = false;
        let s = f.slots.create(draft).await.unwrap();

        assert!(f.occupancies.available_slots().await.unwrap().is_empty());
        assert!(matches!(
            f.occupancies.park(request(&v, &s, Some(10), None)).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn unknown_vehicle_is_not_found() {
        let f = fixture();
        let (_, s) = seed(&f).await;
        let req = ParkRequest {
            vehicle_id: "missing".into(),
            slot_id: s.id.clone(),
            hourly_rate: Some(10),
            ..Default::default()
        };
        assert!(matches!(
            f.occupancies.park(req).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn release_twice_is_not_found() {
        let f = fixture();
        let (v, s) = seed(&f).await;
        let record = f
            .occupancies
            .park(request(&v, &s, Some(10), None))
            .await
            .unwrap();
        f.occupancies.release(record.id).await.unwrap();
        assert!(matches!(
            f.occupancies.release(record.id).await,
            Err(DomainError::NotFound { .. })
        ));
        assert_eq!(f.occupancies.revenue().closed_records, 1);
    }

    #[tokio::test]
    async fn in_flight_release_is_conflict() {
        let f = fixture();
        let (v, s) = seed(&f).await;
        let record = f
            .occupancies
            .park(request(&v, &s, Some(10), None))
            .await
            .unwrap();

        f.occupancies.releasing.insert(record.id, ());
        assert!(matches!(
            f.occupancies.release(record.id).await,
            Err(DomainError::Conflict(_))
        ));
        f.occupancies.releasing.remove(&record.id);

        assert!(f.occupancies.release(record.id).await.is_ok());
        assert!(f.occupancies.releasing.is_empty());
    }

    #[tokio::test]
    async fn huge_hourly_rate_is_rejected_before_parking() {
        let f = fixture();
        let (v, s) = seed(&f).await;
        let mut req = request(&v, &s, Some(i64::MAX / 2), None);
        req.start_time = Some(Utc::now() - Duration::hours(3));
        assert!(matches!(
            f.occupancies.park(req).await,
            Err(DomainError::Validation(_))
        ));
        assert!(f.occupancies.list_open().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn max_rate_releases_without_overflow() {
        let f = fixture();
        let (v, s) = seed(&f).await;
        let start = Utc::now() - Duration::hours(3);
        let mut req = request(&v, &s, Some(crate::domain::occupancy::MAX_RATE), None);
        req.start_time = Some(start);
        let record = f.occupancies.park(req).await.unwrap();

        let receipt = f
            .occupancies
            .release_at(record.id, start + Duration::hours(3))
            .await
            .unwrap();
        assert_eq!(receipt.total_price, crate::domain::occupancy::MAX_RATE * 3);
        assert!(f.occupancies.list_open().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn slot_being_assigned_is_conflict() {
        let f = fixture();
        let (v, s) = seed(&f).await;

        f.occupancies.parking_slots.insert(s.id.clone(), ());
        assert!(matches!(
            f.occupancies.park(request(&v, &s, Some(10), None)).await,
            Err(DomainError::Conflict(_))
        ));
        f.occupancies.parking_slots.remove(&s.id);

        assert!(f
            .occupancies
            .park(request(&v, &s, Some(10), None))
            .await
            .is_ok());
        assert!(f.occupancies.parking_slots.is_empty());
        assert!(f.occupancies.parking_vehicles.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_parks_never_share_a_slot() {
        let f = fixture();
        for round in 0..25 {
            let slot = f
                .slots
                .create(SlotDraft::new(&format!("C{:02}", round)))
                .await
                .unwrap();
            let mut tasks = Vec::new();
            for n in 0..2 {
                let v = f
                    .vehicles
                    .create(vehicle_draft(&format!("R{:02}V{}", round, n)))
                    .await
                    .unwrap();
                let occupancies = f.occupancies.clone();
                let req = request(&v, &slot, Some(10), None);
                tasks.push(tokio::spawn(async move { occupancies.park(req).await }));
            }

            let mut parked = 0;
            for task in tasks {
                match task.await.unwrap() {
                    Ok(_) => parked += 1,
                    Err(e) => assert!(matches!(e, DomainError::Conflict(_)), "{:?}", e),
                }
            }
            assert_eq!(parked, 1, "round {}", round);
        }

        let open = f.occupancies.list_open().await.unwrap();
        let slots: HashSet<&str> = open.iter().map(|r| r.slot_id.as_str()).collect();
        assert_eq!(open.len(), 25);
        assert_eq!(slots.len(), 25);
        assert_eq!(f.slots.occupancy().await.percentage, 100.0);
    }

    #[tokio::test]
    async fn failed_delete_is_finished_by_the_next_release() {
        let repos = Arc::new(FailingDeletes::default());
        let f = fixture_with_repos(repos.clone(), BillingPolicy::default());
        let (v, s) = seed(&f).await;
        let start = Utc::now() - Duration::hours(2);
        let mut req = request(&v, &s, Some(10), None);
        req.start_time = Some(start);
        let record = f.occupancies.park(req).await.unwrap();

        repos.fail.store(true, Ordering::SeqCst);
        assert!(matches!(
            f.occupancies
                .release_at(record.id, start + Duration::hours(2))
                .await,
            Err(DomainError::Storage(_))
        ));
        let stuck = f.occupancies.get(record.id).await.unwrap();
        assert!(stuck.closed);
        assert_eq!(f.occupancies.revenue().total, 20);

        repos.fail.store(false, Ordering::SeqCst);
        let receipt = f.occupancies.release(record.id).await.unwrap();
        assert_eq!(receipt.total_price, 20);
        assert_eq!(receipt.billed_hours, Some(2));
        assert_eq!(receipt.record.end_time, Some(start + Duration::hours(2)));

        assert_eq!(f.occupancies.revenue().total, 20);
        assert_eq!(f.occupancies.revenue().closed_records, 1);
        assert!(matches!(
            f.occupancies.get(record.id).await,
            Err(DomainError::NotFound { .. })
        ));
        f.vehicles.delete(&v.id).await.unwrap();
        f.slots.delete(&s.id).await.unwrap();
    }

    #[tokio::test]
    async fn parked_vehicle_and_occupied_slot_cannot_be_deleted() {
        let f = fixture();
        let (v, s) = seed(&f).await;
        let record = f
            .occupancies
            .park(request(&v, &s, None, Some(30)))
            .await
            .unwrap();

        assert!(matches!(
            f.vehicles.delete(&v.id).await,
            Err(DomainError::Conflict(_))
        ));
        assert!(matches!(
            f.slots.delete(&s.id).await,
            Err(DomainError::Conflict(_))
        ));

        f.occupancies.release(record.id).await.unwrap();
        f.vehicles.delete(&v.id).await.unwrap();
        f.slots.delete(&s.id).await.unwrap();
    }
}

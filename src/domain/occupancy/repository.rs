//! Occupancy repository interface

use async_trait::async_trait;

use super::model::OccupancyRecord;
use crate::domain::DomainResult;

#[async_trait]
pub trait OccupancyRepository: Send + Sync {
    /// Persist a new record and return it with its assigned ID
    async fn save(&self, record: OccupancyRecord) -> DomainResult<OccupancyRecord>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<OccupancyRecord>>;
    async fn update(&self, record: OccupancyRecord) -> DomainResult<()>;
    async fn delete(&self, id: i32) -> DomainResult<()>;
    /// Records that have not been closed yet, oldest first
    async fn find_open(&self) -> DomainResult<Vec<OccupancyRecord>>;
    async fn find_open_for_slot(&self, slot_id: &str) -> DomainResult<Option<OccupancyRecord>>;
    async fn find_open_for_vehicle(&self, vehicle_id: &str)
        -> DomainResult<Option<OccupancyRecord>>;
    async fn count_open(&self) -> DomainResult<u64>;
}

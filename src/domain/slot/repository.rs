//! Slot repository interface

use async_trait::async_trait;

use super::model::Slot;
use crate::domain::DomainResult;

#[async_trait]
pub trait SlotRepository: Send + Sync {
    async fn find_all(&self) -> DomainResult<Vec<Slot>>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Slot>>;
    async fn find_by_code(&self, code: &str) -> DomainResult<Option<Slot>>;
    async fn save(&self, slot: Slot) -> DomainResult<()>;
    async fn update(&self, slot: Slot) -> DomainResult<()>;
    async fn delete(&self, id: &str) -> DomainResult<()>;
    async fn count_active(&self) -> DomainResult<u64>;
}

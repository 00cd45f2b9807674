//! Vehicle repository interface

use async_trait::async_trait;

use super::model::Vehicle;
use crate::domain::DomainResult;

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn find_all(&self) -> DomainResult<Vec<Vehicle>>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Vehicle>>;
    async fn find_by_plate(&self, plate: &str) -> DomainResult<Option<Vehicle>>;
    async fn save(&self, vehicle: Vehicle) -> DomainResult<()>;
    async fn update(&self, vehicle: Vehicle) -> DomainResult<()>;
    async fn delete(&self, id: &str) -> DomainResult<()>;
}

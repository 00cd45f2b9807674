//! Domain layer: entities, business rules and repository interfaces

pub mod events;
pub mod occupancy;
pub mod repositories;
pub mod slot;
pub mod vehicle;

pub use occupancy::{BillingPolicy, OccupancyRecord, Pricing, RateForm};
pub use repositories::{DomainResult, RepositoryProvider};
pub use slot::{OccupancyStats, Slot};
pub use vehicle::{Vehicle, VehicleBrand, VehicleType};

pub use crate::shared::errors::DomainError;

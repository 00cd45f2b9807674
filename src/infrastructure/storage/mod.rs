//! In-memory repository implementations

mod memory;

pub use memory::{
    InMemoryOccupancyRepository, InMemoryRepositoryProvider, InMemorySlotRepository,
    InMemoryVehicleRepository,
};

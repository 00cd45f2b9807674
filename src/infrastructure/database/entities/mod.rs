//! Database entities module

pub mod occupancy;
pub mod slot;
pub mod vehicle;

pub use occupancy::Entity as Occupancy;
pub use slot::Entity as Slot;
pub use vehicle::Entity as Vehicle;

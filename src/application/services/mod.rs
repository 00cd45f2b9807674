//! Application services

mod occupancy;
mod revenue;
mod slot;
mod vehicle;

pub use occupancy::{Availability, OccupancyService, ParkRequest, ReleaseReceipt, Revenue};
pub use revenue::{RevenueLedger, RevenueSnapshot};
pub use slot::{SlotDraft, SlotService};
pub use vehicle::{VehicleDraft, VehicleService};

//! Slot aggregate

pub mod model;
pub mod repository;

pub use model::{OccupancyStats, Slot};
pub use repository::SlotRepository;

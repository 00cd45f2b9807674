//! Vehicle aggregate

pub mod model;
pub mod repository;

pub use model::{format_owner_contact, normalize_plate, Vehicle, VehicleBrand, VehicleType};
pub use repository::VehicleRepository;

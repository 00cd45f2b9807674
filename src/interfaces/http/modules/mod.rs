pub mod health;
pub mod metrics;
pub mod occupancies;
pub mod request_id;
pub mod slots;
pub mod vehicles;

//! Occupancy aggregate
//!
//! Contains the occupancy record, its pricing terms, the billing
//! calculator and the repository interface.

pub mod billing;
pub mod model;
pub mod rate_form;
pub mod repository;

pub use billing::{format_amount, BillingPolicy};
pub use model::{OccupancyRecord, Pricing};
pub use rate_form::{RateField, RateForm, MAX_RATE};
pub use repository::OccupancyRepository;

//! # Parking Service
//!
//! Parking lot occupancy and billing: vehicles are assigned to slots under
//! either an hourly or a fixed price, and billed when the slot is released.
//!
//! ## Architecture
//!
//! - **domain**: entities, billing rules, the rate form and repository traits
//! - **application**: services orchestrating park / release, events, revenue
//! - **infrastructure**: SeaORM persistence and in-memory storage
//! - **interfaces**: REST API and live event WebSocket
//! - **shared**: errors and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{init_database, DatabaseConfig, InMemoryRepositoryProvider, SeaOrmRepositoryProvider};

pub use interfaces::http::{create_api_router, ApiServices};

pub use application::{create_event_bus, Event, EventBus, SharedEventBus};

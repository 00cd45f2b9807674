//! Notification events
//!
//! Defines all event types that can be broadcast to subscribers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event types for notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    VehicleParked(VehicleParkedEvent),
    SlotReleased(SlotReleasedEvent),
    OccupancyChanged(OccupancyChangedEvent),
}

impl Event {
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::VehicleParked(_) => "vehicle_parked",
            Event::SlotReleased(_) => "slot_released",
            Event::OccupancyChanged(_) => "occupancy_changed",
        }
    }

    /// Slot the event refers to, if any
    pub fn slot_id(&self) -> Option<&str> {
        match self {
            Event::VehicleParked(e) => Some(&e.slot_id),
            Event::SlotReleased(e) => Some(&e.slot_id),
            Event::OccupancyChanged(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleParkedEvent {
    pub occupancy_id: i32,
    pub slot_id: String,
    pub slot_code: String,
    pub vehicle_id: String,
    pub vehicle_plate: String,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotReleasedEvent {
    pub occupancy_id: i32,
    pub slot_id: String,
    pub slot_code: String,
    pub vehicle_plate: String,
    pub end_time: DateTime<Utc>,
    pub total_price: i64,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccupancyChangedEvent {
    pub total_slots: u64,
    pub occupied_slots: u64,
    pub percentage: f64,
    pub timestamp: DateTime<Utc>,
}

/// Wrapper for sending events with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: Event,
}

impl EventMessage {
    pub fn new(event: Event) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event,
        }
    }
}

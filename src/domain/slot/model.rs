//! Slot domain entity

use chrono::{DateTime, Utc};

use crate::shared::errors::DomainError;

/// A parking space
#[derive(Debug, Clone)]
pub struct Slot {
    pub id: String,
    /// Human-facing identifier painted on the floor (e.g. "A01")
    pub code: String,
    pub covered: bool,
    /// Whether a pickup/truck fits in the space
    pub truck_capable: bool,
    pub active: bool,
    pub reserved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Slot {
    pub fn new(code: &str) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            code: code.trim().to_string(),
            covered: false,
            truck_capable: true,
            active: true,
            reserved: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.code.trim().is_empty() {
            return Err(DomainError::Validation("code is required".into()));
        }
        Ok(())
    }

    /// Whether a vehicle may be parked here (ignoring current occupancy)
    pub fn accepts_vehicles(&self) -> bool {
        self.active
    }
}

/// Share of active slots currently occupied
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OccupancyStats {
    pub total_slots: u64,
    pub occupied_slots: u64,
    /// 0–100, rounded to two decimals
    pub percentage: f64,
}

impl OccupancyStats {
    pub fn compute(total_slots: u64, occupied_slots: u64) -> Self {
        let percentage = if total_slots == 0 {
            0.0
        } else {
            let raw = occupied_slots as f64 / total_slots as f64 * 100.0;
            (raw.min(100.0) * 100.0).round() / 100.0
        };
        Self {
            total_slots,
            occupied_slots,
            percentage,
        }
    }

    pub fn free_slots(&self) -> u64 {
        self.total_slots.saturating_sub(self.occupied_slots)
    }
}

// ── Tests ──────────────────────────────────────────────────────

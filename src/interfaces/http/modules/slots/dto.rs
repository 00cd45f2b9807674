//! Slot DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::SlotDraft;
use crate::domain::{OccupancyStats, Slot};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SlotResponse {
    pub id: String,
    pub code: String,
    pub covered: bool,
    pub truck_capable: bool,
    pub active: bool,
    pub reserved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Slot> for SlotResponse {
    fn from(s: Slot) -> Self {
        Self {
            id: s.id,
            code: s.code,
            covered: s.covered,
            truck_capable: s.truck_capable,
            active: s.active,
            reserved: s.reserved,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

/// Omitted flags take the registration defaults on create and keep
/// their stored value on update.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SlotRequest {
    #[validate(length(min = 1, max = 20, message = "code is required"))]
    pub code: String,
    pub covered: Option<bool>,
    pub truck_capable: Option<bool>,
    pub active: Option<bool>,
    pub reserved: Option<bool>,
}

impl SlotRequest {
    pub fn into_draft(self, base: SlotDraft) -> SlotDraft {
        SlotDraft {
            code: self.code,
            covered: self.covered.unwrap_or(base.covered),
            truck_capable: self.truck_capable.unwrap_or(base.truck_capable),
            active: self.active.unwrap_or(base.active),
            reserved: self.reserved.unwrap_or(base.reserved),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OccupancyStatsResponse {
    /// Active slots
    pub total_slots: u64,
    pub occupied_slots: u64,
    pub free_slots: u64,
    /// 0-100, two decimals
    pub percentage: f64,
}

impl From<OccupancyStats> for OccupancyStatsResponse {
    fn from(s: OccupancyStats) -> Self {
        Self {
            total_slots: s.total_slots,
            occupied_slots: s.occupied_slots,
            free_slots: s.free_slots(),
            percentage: s.percentage,
        }
    }
}

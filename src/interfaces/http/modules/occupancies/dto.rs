//! Occupancy DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::services::{Availability, ParkRequest, ReleaseReceipt, Revenue};
use crate::domain::occupancy::format_amount;
use crate::domain::OccupancyRecord;
use crate::interfaces::http::modules::slots::SlotResponse;
use crate::interfaces::http::modules::vehicles::VehicleResponse;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OccupancyResponse {
    pub id: i32,
    pub slot_id: String,
    pub slot_code: String,
    pub vehicle_id: String,
    pub vehicle_plate: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    /// Exactly one of `hourly_rate` / `fixed_rate` is set
    pub hourly_rate: Option<i64>,
    pub fixed_rate: Option<i64>,
    /// Zero until released
    pub total_price: i64,
    pub closed: bool,
    pub elapsed_seconds: i64,
}

impl From<OccupancyRecord> for OccupancyResponse {
    fn from(r: OccupancyRecord) -> Self {
        let elapsed_seconds = r.elapsed_seconds(Utc::now());
        Self {
            id: r.id,
            hourly_rate: r.hourly_rate(),
            fixed_rate: r.fixed_rate(),
            slot_id: r.slot_id,
            slot_code: r.slot_code,
            vehicle_id: r.vehicle_id,
            vehicle_plate: r.vehicle_plate,
            start_time: r.start_time,
            end_time: r.end_time,
            total_price: r.total_price,
            closed: r.closed,
            elapsed_seconds,
        }
    }
}

/// Assign a vehicle to a slot. Fill exactly one of the two rates.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ParkVehicleRequest {
    #[validate(length(min = 1, message = "vehicle is required"))]
    pub vehicle_id: String,
    #[validate(length(min = 1, message = "slot is required"))]
    pub slot_id: String,
    /// Price per started hour, smallest currency unit
    #[validate(range(
        min = 0,
        max = 100_000_000,
        message = "hourly price must be between 0 and 100000000"
    ))]
    pub hourly_rate: Option<i64>,
    /// Flat price, smallest currency unit
    #[validate(range(
        min = 0,
        max = 100_000_000,
        message = "fixed price must be between 0 and 100000000"
    ))]
    pub fixed_rate: Option<i64>,
    /// Defaults to now
    pub start_time: Option<DateTime<Utc>>,
}

impl From<ParkVehicleRequest> for ParkRequest {
    fn from(r: ParkVehicleRequest) -> Self {
        Self {
            vehicle_id: r.vehicle_id,
            slot_id: r.slot_id,
            hourly_rate: r.hourly_rate,
            fixed_rate: r.fixed_rate,
            start_time: r.start_time,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReleaseResponse {
    pub occupancy: OccupancyResponse,
    /// `null` for fixed pricing
    pub billed_hours: Option<i64>,
    pub total_price: i64,
    pub currency: String,
    pub formatted_total: String,
}

impl From<ReleaseReceipt> for ReleaseResponse {
    fn from(r: ReleaseReceipt) -> Self {
        Self {
            formatted_total: format_amount(r.total_price, &r.currency),
            occupancy: r.record.into(),
            billed_hours: r.billed_hours,
            total_price: r.total_price,
            currency: r.currency,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RevenueResponse {
    pub total: i64,
    pub closed_records: u64,
    pub currency: String,
    pub formatted_total: String,
}

impl From<Revenue> for RevenueResponse {
    fn from(r: Revenue) -> Self {
        Self {
            formatted_total: format_amount(r.total, &r.currency),
            total: r.total,
            closed_records: r.closed_records,
            currency: r.currency,
        }
    }
}

/// Pick lists for the park form
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityResponse {
    pub vehicles: Vec<VehicleResponse>,
    pub slots: Vec<SlotResponse>,
}

impl From<Availability> for AvailabilityResponse {
    fn from(a: Availability) -> Self {
        Self {
            vehicles: a.vehicles.into_iter().map(Into::into).collect(),
            slots: a.slots.into_iter().map(Into::into).collect(),
        }
    }
}

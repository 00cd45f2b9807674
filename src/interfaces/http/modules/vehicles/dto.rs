//! Vehicle DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::VehicleDraft;
use crate::domain::{Vehicle, VehicleBrand, VehicleType};

/// Catalogue entry (brand or vehicle type)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatalogRef {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VehicleResponse {
    pub id: String,
    pub model: String,
    pub brand: CatalogRef,
    pub vehicle_type: CatalogRef,
    /// Upper-case, no whitespace
    pub plate: String,
    pub color: String,
    pub owner_name: String,
    /// Formatted as `(dd) nnnnn-nnnn`
    pub owner_contact: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(v: Vehicle) -> Self {
        Self {
            id: v.id,
            model: v.model,
            brand: CatalogRef {
                id: v.brand.id,
                name: v.brand.name,
            },
            vehicle_type: CatalogRef {
                id: v.kind.id,
                name: v.kind.name,
            },
            plate: v.plate,
            color: v.color,
            owner_name: v.owner_name,
            owner_contact: v.owner_contact,
            created_at: v.created_at,
            updated_at: v.updated_at,
        }
    }
}

/// Body for both registration and edit
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VehicleRequest {
    #[validate(length(min = 1, max = 100, message = "model is required"))]
    pub model: String,
    pub brand: CatalogRef,
    pub vehicle_type: CatalogRef,
    /// Whitespace is stripped and letters upper-cased before the 7-character check
    #[validate(length(min = 1, max = 20, message = "plate is required"))]
    pub plate: String,
    #[validate(length(min = 1, max = 50, message = "color is required"))]
    pub color: String,
    #[validate(length(min = 1, max = 120, message = "owner name is required"))]
    pub owner_name: String,
    #[validate(length(min = 1, max = 30, message = "owner contact is required"))]
    pub owner_contact: String,
}

impl From<VehicleRequest> for VehicleDraft {
    fn from(r: VehicleRequest) -> Self {
        Self {
            model: r.model,
            brand: VehicleBrand {
                id: r.brand.id,
                name: r.brand.name,
            },
            kind: VehicleType {
                id: r.vehicle_type.id,
                name: r.vehicle_type.name,
            },
            plate: r.plate,
            color: r.color,
            owner_name: r.owner_name,
            owner_contact: r.owner_contact,
        }
    }
}

//! Vehicle directory service

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::vehicle::{format_owner_contact, normalize_plate};
use crate::domain::{DomainError, DomainResult, RepositoryProvider, Vehicle, VehicleBrand, VehicleType};

/// Fields supplied when registering or editing a vehicle
#[derive(Debug, Clone)]
pub struct VehicleDraft {
    pub model: String,
    pub brand: VehicleBrand,
    pub kind: VehicleType,
    pub plate: String,
    pub color: String,
    pub owner_name: String,
    pub owner_contact: String,
}

pub struct VehicleService {
    repos: Arc<dyn RepositoryProvider>,
}

impl VehicleService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self) -> DomainResult<Vec<Vehicle>> {
        self.repos.vehicles().find_all().await
    }

    pub async fn get(&self, id: &str) -> DomainResult<Vehicle> {
        self.repos
            .vehicles()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Vehicle", "id", id))
    }

    pub async fn create(&self, draft: VehicleDraft) -> DomainResult<Vehicle> {
        let vehicle = Vehicle::new(
            draft.model,
            draft.brand,
            draft.kind,
            &draft.plate,
            draft.color,
            draft.owner_name,
            &draft.owner_contact,
        );
        vehicle.validate()?;
        self.ensure_plate_free(&vehicle.plate, None).await?;

        self.repos.vehicles().save(vehicle.clone()).await?;
        info!(vehicle_id = vehicle.id.as_str(), plate = vehicle.plate.as_str(), "Vehicle registered");
        Ok(vehicle)
    }

    pub async fn update(&self, id: &str, draft: VehicleDraft) -> DomainResult<Vehicle> {
        let mut vehicle = self.get(id).await?;
        vehicle.model = draft.model;
        vehicle.brand = draft.brand;
        vehicle.kind = draft.kind;
        vehicle.plate = normalize_plate(&draft.plate);
        vehicle.color = draft.color;
        vehicle.owner_name = draft.owner_name;
        vehicle.owner_contact = format_owner_contact(&draft.owner_contact);
        vehicle.updated_at = Utc::now();

        vehicle.validate()?;
        self.ensure_plate_free(&vehicle.plate, Some(id)).await?;

        self.repos.vehicles().update(vehicle.clone()).await?;
        info!(vehicle_id = id, plate = vehicle.plate.as_str(), "Vehicle updated");
        Ok(vehicle)
    }

    pub async fn delete(&self, id: &str) -> DomainResult<()> {
        let vehicle = self.get(id).await?;
        if self
            .repos
            .occupancies()
            .find_open_for_vehicle(id)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(format!(
                "vehicle {} is currently parked",
                vehicle.plate
            )));
        }
        self.repos.vehicles().delete(id).await?;
        info!(vehicle_id = id, plate = vehicle.plate.as_str(), "Vehicle deleted");
        Ok(())
    }

    async fn ensure_plate_free(&self, plate: &str, own_id: Option<&str>) -> DomainResult<()> {
        match self.repos.vehicles().find_by_plate(plate).await? {
            Some(existing) if Some(existing.id.as_str()) != own_id => Err(DomainError::Conflict(
                format!("a vehicle with plate {} is already registered", plate),
            )),
            _ => Ok(()),
        }
    }
}

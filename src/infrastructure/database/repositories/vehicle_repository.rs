//! SeaORM implementation of VehicleRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::db_err;
use crate::domain::vehicle::{Vehicle, VehicleBrand, VehicleRepository, VehicleType};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::vehicle;

pub struct SeaOrmVehicleRepository {
    db: DatabaseConnection,
}

impl SeaOrmVehicleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: vehicle::Model) -> Vehicle {
    Vehicle {
        id: m.id,
        model: m.model,
        brand: VehicleBrand {
            id: m.brand_id,
            name: m.brand_name,
        },
        kind: VehicleType {
            id: m.type_id,
            name: m.type_name,
        },
        plate: m.plate,
        color: m.color,
        owner_name: m.owner_name,
        owner_contact: m.owner_contact,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(v: Vehicle) -> vehicle::ActiveModel {
    vehicle::ActiveModel {
        id: Set(v.id),
        model: Set(v.model),
        brand_id: Set(v.brand.id),
        brand_name: Set(v.brand.name),
        type_id: Set(v.kind.id),
        type_name: Set(v.kind.name),
        plate: Set(v.plate),
        color: Set(v.color),
        owner_name: Set(v.owner_name),
        owner_contact: Set(v.owner_contact),
        created_at: Set(v.created_at),
        updated_at: Set(v.updated_at),
    }
}

// ── VehicleRepository impl ──────────────────────────────────────

#[async_trait]
impl VehicleRepository for SeaOrmVehicleRepository {
    async fn find_all(&self) -> DomainResult<Vec<Vehicle>> {
        let models = vehicle::Entity::find()
            .order_by_asc(vehicle::Column::Plate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Vehicle>> {
        let model = vehicle::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_plate(&self, plate: &str) -> DomainResult<Option<Vehicle>> {
        let model = vehicle::Entity::find()
            .filter(vehicle::Column::Plate.eq(plate))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn save(&self, v: Vehicle) -> DomainResult<()> {
        debug!("Saving vehicle: {} ({})", v.id, v.plate);
        domain_to_active(v).insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn update(&self, v: Vehicle) -> DomainResult<()> {
        debug!("Updating vehicle: {}", v.id);

        let existing = vehicle::Entity::find_by_id(v.id.as_str())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("Vehicle", "id", &v.id));
        }

        domain_to_active(v).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let result = vehicle::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Vehicle", "id", id));
        }
        Ok(())
    }
}

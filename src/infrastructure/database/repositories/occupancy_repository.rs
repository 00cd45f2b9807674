//! SeaORM implementation of OccupancyRepository

use async_trait::async_trait;
use log::{debug, error};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::db_err;
use crate::domain::occupancy::{OccupancyRecord, OccupancyRepository, Pricing};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::occupancy;

pub struct SeaOrmOccupancyRepository {
    db: DatabaseConnection,
}

impl SeaOrmOccupancyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: occupancy::Model) -> DomainResult<OccupancyRecord> {
    let pricing = Pricing::from_rates(m.hourly_rate, m.fixed_rate).ok_or_else(|| {
        error!("Occupancy {} is stored without a positive rate", m.id);
        DomainError::Storage(format!("occupancy {} has no positive rate", m.id))
    })?;

    Ok(OccupancyRecord {
        id: m.id,
        slot_id: m.slot_id,
        slot_code: m.slot_code,
        vehicle_id: m.vehicle_id,
        vehicle_plate: m.vehicle_plate,
        start_time: m.start_time,
        end_time: m.end_time,
        pricing,
        total_price: m.total_price,
        closed: m.closed,
    })
}

fn models_to_domain(models: Vec<occupancy::Model>) -> DomainResult<Vec<OccupancyRecord>> {
    models.into_iter().map(model_to_domain).collect()
}

// ── OccupancyRepository impl ────────────────────────────────────

#[async_trait]
impl OccupancyRepository for SeaOrmOccupancyRepository {
    async fn save(&self, r: OccupancyRecord) -> DomainResult<OccupancyRecord> {
        debug!("Saving occupancy: slot={} vehicle={}", r.slot_code, r.vehicle_plate);

        let model = occupancy::ActiveModel {
            id: NotSet,
            slot_id: Set(r.slot_id),
            slot_code: Set(r.slot_code),
            vehicle_id: Set(r.vehicle_id),
            vehicle_plate: Set(r.vehicle_plate),
            start_time: Set(r.start_time),
            end_time: Set(r.end_time),
            hourly_rate: Set(r.pricing.hourly_rate()),
            fixed_rate: Set(r.pricing.fixed_rate()),
            total_price: Set(r.total_price),
            closed: Set(r.closed),
        };
        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        model_to_domain(inserted)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<OccupancyRecord>> {
        let model = occupancy::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn update(&self, r: OccupancyRecord) -> DomainResult<()> {
        debug!("Updating occupancy: {} closed={}", r.id, r.closed);

        let existing = occupancy::Entity::find_by_id(r.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        let Some(existing) = existing else {
            return Err(DomainError::not_found("Occupancy", "id", r.id));
        };

        let mut active: occupancy::ActiveModel = existing.into();
        active.end_time = Set(r.end_time);
        active.hourly_rate = Set(r.pricing.hourly_rate());
        active.fixed_rate = Set(r.pricing.fixed_rate());
        active.total_price = Set(r.total_price);
        active.closed = Set(r.closed);
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = occupancy::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Occupancy", "id", id));
        }
        Ok(())
    }

    async fn find_open(&self) -> DomainResult<Vec<OccupancyRecord>> {
        let models = occupancy::Entity::find()
            .filter(occupancy::Column::Closed.eq(false))
            .order_by_asc(occupancy::Column::StartTime)
            .order_by_asc(occupancy::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models_to_domain(models)
    }

    async fn find_open_for_slot(&self, slot_id: &str) -> DomainResult<Option<OccupancyRecord>> {
        let model = occupancy::Entity::find()
            .filter(occupancy::Column::SlotId.eq(slot_id))
            .filter(occupancy::Column::Closed.eq(false))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_open_for_vehicle(
        &self,
        vehicle_id: &str,
    ) -> DomainResult<Option<OccupancyRecord>> {
        let model = occupancy::Entity::find()
            .filter(occupancy::Column::VehicleId.eq(vehicle_id))
            .filter(occupancy::Column::Closed.eq(false))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn count_open(&self) -> DomainResult<u64> {
        occupancy::Entity::find()
            .filter(occupancy::Column::Closed.eq(false))
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}

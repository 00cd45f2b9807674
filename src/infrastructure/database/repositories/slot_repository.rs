//! SeaORM implementation of SlotRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::db_err;
use crate::domain::slot::{Slot, SlotRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::slot;

pub struct SeaOrmSlotRepository {
    db: DatabaseConnection,
}

impl SeaOrmSlotRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: slot::Model) -> Slot {
    Slot {
        id: m.id,
        code: m.code,
        covered: m.covered,
        truck_capable: m.truck_capable,
        active: m.active,
        reserved: m.reserved,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(s: Slot) -> slot::ActiveModel {
    slot::ActiveModel {
        id: Set(s.id),
        code: Set(s.code),
        covered: Set(s.covered),
        truck_capable: Set(s.truck_capable),
        active: Set(s.active),
        reserved: Set(s.reserved),
        created_at: Set(s.created_at),
        updated_at: Set(s.updated_at),
    }
}

#[async_trait]
impl SlotRepository for SeaOrmSlotRepository {
    async fn find_all(&self) -> DomainResult<Vec<Slot>> {
        let models = slot::Entity::find()
            .order_by_asc(slot::Column::Code)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Slot>> {
        let model = slot::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_code(&self, code: &str) -> DomainResult<Option<Slot>> {
        let model = slot::Entity::find()
            .filter(slot::Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn save(&self, s: Slot) -> DomainResult<()> {
        debug!("Saving slot: {} ({})", s.id, s.code);
        domain_to_active(s).insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn update(&self, s: Slot) -> DomainResult<()> {
        debug!("Updating slot: {}", s.id);

        let existing = slot::Entity::find_by_id(s.id.as_str())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("Slot", "id", &s.id));
        }

        domain_to_active(s).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let result = slot::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Slot", "id", id));
        }
        Ok(())
    }

    async fn count_active(&self) -> DomainResult<u64> {
        slot::Entity::find()
            .filter(slot::Column::Active.eq(true))
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}

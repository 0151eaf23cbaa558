// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::spare_part::SparePart;
use crate::domain::repositories::repair_task_repository::RepositoryError;
use crate::domain::repositories::spare_part_repository::SparePartRepository;
use crate::infrastructure::database::entities::spare_part as part_entity;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, Func},
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

/// 备件库存仓库实现
#[derive(Clone)]
pub struct SparePartRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl SparePartRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<part_entity::Model> for SparePart {
    fn from(model: part_entity::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            nsn: model.nsn,
            part_number: model.part_number,
            quantity: model.quantity,
            price: model.price,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&SparePart> for part_entity::ActiveModel {
    fn from(part: &SparePart) -> Self {
        Self {
            id: Set(part.id),
            name: Set(part.name.clone()),
            description: Set(part.description.clone()),
            nsn: Set(part.nsn.clone()),
            part_number: Set(part.part_number.clone()),
            quantity: Set(part.quantity),
            price: Set(part.price),
            created_at: Set(part.created_at),
            updated_at: Set(part.updated_at),
        }
    }
}

#[async_trait]
impl SparePartRepository for SparePartRepositoryImpl {
    async fn create(&self, part: &SparePart) -> Result<SparePart, RepositoryError> {
        let model: part_entity::ActiveModel = part.into();
        model.insert(self.db.as_ref()).await?;
        Ok(part.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SparePart>, RepositoryError> {
        let model = part_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_by_key(
        &self,
        name: &str,
        part_number: &str,
    ) -> Result<Vec<SparePart>, RepositoryError> {
        let models = part_entity::Entity::find()
            .filter(part_entity::Column::Name.eq(name))
            .filter(part_entity::Column::PartNumber.eq(part_number))
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list(&self, search: Option<&str>) -> Result<Vec<SparePart>, RepositoryError> {
        let mut select = part_entity::Entity::find();

        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            let pattern = format!("%{}%", term.to_lowercase());
            let mut any = Condition::any();
            for column in [
                part_entity::Column::Name,
                part_entity::Column::Nsn,
                part_entity::Column::PartNumber,
            ] {
                any = any.add(Expr::expr(Func::lower(Expr::col(column))).like(pattern.clone()));
            }
            select = select.filter(any);
        }

        let models = select
            .order_by_asc(part_entity::Column::Name)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, part: &SparePart) -> Result<SparePart, RepositoryError> {
        let model: part_entity::ActiveModel = part.into();
        let updated = model.update(self.db.as_ref()).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => RepositoryError::NotFound,
            other => other.into(),
        })?;
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = part_entity::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn adjust_quantity(&self, id: Uuid, delta: i32) -> Result<i32, RepositoryError> {
        let txn = self.db.begin().await?;

        let result = part_entity::Entity::update_many()
            .col_expr(
                part_entity::Column::Quantity,
                Expr::col(part_entity::Column::Quantity).add(delta),
            )
            .col_expr(
                part_entity::Column::UpdatedAt,
                Expr::value(Utc::now().fixed_offset()),
            )
            .filter(part_entity::Column::Id.eq(id))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(RepositoryError::NotFound);
        }

        let part = part_entity::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(RepositoryError::NotFound)?;
        txn.commit().await?;

        Ok(part.quantity)
    }
}

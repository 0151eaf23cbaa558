// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::repair_manual::RepairManual;
use crate::domain::repositories::repair_manual_repository::RepairManualRepository;
use crate::domain::repositories::repair_task_repository::RepositoryError;
use crate::infrastructure::database::entities::repair_manual as manual_entity;
use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;
use uuid::Uuid;

/// 维修手册仓库实现
#[derive(Clone)]
pub struct RepairManualRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl RepairManualRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<manual_entity::Model> for RepairManual {
    fn from(model: manual_entity::Model) -> Self {
        Self {
            id: model.id,
            device_name: model.device_name,
            issue: model.issue,
            title: model.title,
            content: model.content,
            created_at: model.created_at,
        }
    }
}

#[async_trait]
impl RepairManualRepository for RepairManualRepositoryImpl {
    async fn create(&self, manual: &RepairManual) -> Result<RepairManual, RepositoryError> {
        let model = manual_entity::ActiveModel {
            id: Set(manual.id),
            device_name: Set(manual.device_name.clone()),
            issue: Set(manual.issue.clone()),
            title: Set(manual.title.clone()),
            content: Set(manual.content.clone()),
            created_at: Set(manual.created_at),
        };

        model.insert(self.db.as_ref()).await?;
        Ok(manual.clone())
    }

    async fn find_for_issue(
        &self,
        device_name: &str,
        issue: &str,
    ) -> Result<Option<RepairManual>, RepositoryError> {
        let model = manual_entity::Entity::find()
            .filter(manual_entity::Column::DeviceName.eq(device_name))
            .filter(manual_entity::Column::Issue.eq(issue))
            .order_by_desc(manual_entity::Column::CreatedAt)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<RepairManual>, RepositoryError> {
        let models = manual_entity::Entity::find()
            .order_by_asc(manual_entity::Column::DeviceName)
            .order_by_asc(manual_entity::Column::Issue)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = manual_entity::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::repair_history::RepairHistoryEntry;
use crate::domain::repositories::repair_history_repository::RepairHistoryRepository;
use crate::domain::repositories::repair_task_repository::RepositoryError;
use crate::infrastructure::database::entities::repair_history as history_entity;
use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;
use uuid::Uuid;

/// 维修历史仓库实现，只追加不修改
#[derive(Clone)]
pub struct RepairHistoryRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl RepairHistoryRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<history_entity::Model> for RepairHistoryEntry {
    fn from(model: history_entity::Model) -> Self {
        Self {
            id: model.id,
            repair_task_id: model.repair_task_id,
            action: model.action,
            user_id: model.user_id,
            created_at: model.created_at,
        }
    }
}

#[async_trait]
impl RepairHistoryRepository for RepairHistoryRepositoryImpl {
    async fn append(&self, entry: &RepairHistoryEntry) -> Result<(), RepositoryError> {
        let model = history_entity::ActiveModel {
            id: Set(entry.id),
            repair_task_id: Set(entry.repair_task_id),
            action: Set(entry.action.clone()),
            user_id: Set(entry.user_id),
            created_at: Set(entry.created_at),
        };

        model.insert(self.db.as_ref()).await?;
        Ok(())
    }

    async fn list_for_task(
        &self,
        repair_task_id: Uuid,
    ) -> Result<Vec<RepairHistoryEntry>, RepositoryError> {
        let models = history_entity::Entity::find()
            .filter(history_entity::Column::RepairTaskId.eq(repair_task_id))
            .order_by_asc(history_entity::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_recent(&self, limit: u64) -> Result<Vec<RepairHistoryEntry>, RepositoryError> {
        let models = history_entity::Entity::find()
            .order_by_desc(history_entity::Column::CreatedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}

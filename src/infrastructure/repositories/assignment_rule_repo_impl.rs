// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::assignment_rule::AssignmentRule;
use crate::domain::repositories::assignment_rule_repository::AssignmentRuleRepository;
use crate::domain::repositories::repair_task_repository::RepositoryError;
use crate::infrastructure::database::entities::assignment_rule as rule_entity;
use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;
use uuid::Uuid;

/// 分配规则仓库实现
#[derive(Clone)]
pub struct AssignmentRuleRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl AssignmentRuleRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<rule_entity::Model> for AssignmentRule {
    fn from(model: rule_entity::Model) -> Self {
        Self {
            id: model.id,
            device_name: model.device_name,
            assigned_user_id: model.assigned_user_id,
            created_at: model.created_at,
        }
    }
}

#[async_trait]
impl AssignmentRuleRepository for AssignmentRuleRepositoryImpl {
    async fn create(&self, rule: &AssignmentRule) -> Result<AssignmentRule, RepositoryError> {
        let model = rule_entity::ActiveModel {
            id: Set(rule.id),
            device_name: Set(rule.device_name.clone()),
            assigned_user_id: Set(rule.assigned_user_id),
            created_at: Set(rule.created_at),
        };

        model.insert(self.db.as_ref()).await?;
        Ok(rule.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AssignmentRule>, RepositoryError> {
        let model = rule_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_by_device(
        &self,
        device_name: &str,
    ) -> Result<Option<AssignmentRule>, RepositoryError> {
        let model = rule_entity::Entity::find()
            .filter(rule_entity::Column::DeviceName.eq(device_name))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<AssignmentRule>, RepositoryError> {
        let models = rule_entity::Entity::find()
            .order_by_asc(rule_entity::Column::DeviceName)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, rule: &AssignmentRule) -> Result<AssignmentRule, RepositoryError> {
        let model = rule_entity::ActiveModel {
            id: Unchanged(rule.id),
            device_name: Set(rule.device_name.clone()),
            assigned_user_id: Set(rule.assigned_user_id),
            created_at: Unchanged(rule.created_at),
        };

        let updated = model.update(self.db.as_ref()).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => RepositoryError::NotFound,
            other => other.into(),
        })?;
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = rule_entity::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

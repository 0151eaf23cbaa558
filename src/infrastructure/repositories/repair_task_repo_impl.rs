// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::repair_task::{ConsumedPart, RepairTask, TaskStatus};
use crate::domain::repositories::repair_task_repository::{
    RepairTaskQuery, RepairTaskRepository, RepositoryError, TaskDateField,
};
use crate::infrastructure::database::entities::repair_task as task_entity;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use sea_orm::{
    sea_query::{Expr, Func},
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use std::sync::Arc;
use uuid::Uuid;

/// 维修任务仓库实现
///
/// 基于SeaORM实现，备件快照以 JSON 数组保存在 `spare_parts` 列中
#[derive(Clone)]
pub struct RepairTaskRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl RepairTaskRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// 把查询条件翻译成 SELECT，不含分页和排序
    fn filtered(query: &RepairTaskQuery) -> Select<task_entity::Entity> {
        let mut select = task_entity::Entity::find();

        if let Some(statuses) = &query.statuses {
            select = select.filter(
                task_entity::Column::Status.is_in(statuses.iter().map(ToString::to_string)),
            );
        }
        if let Some(excluded) = query.exclude_status {
            select = select.filter(task_entity::Column::Status.ne(excluded.to_string()));
        }
        if let Some(user_id) = query.assigned_user_id {
            select = select.filter(task_entity::Column::AssignedUserId.eq(user_id));
        }
        if let Some(term) = query.search.as_deref().map(str::trim) {
            if !term.is_empty() {
                let pattern = format!("%{}%", term.to_lowercase());
                select = select.filter(
                    Condition::any()
                        .add(
                            Expr::expr(Func::lower(Expr::col(task_entity::Column::DeviceName)))
                                .like(pattern.clone()),
                        )
                        .add(
                            Expr::expr(Func::lower(Expr::col(task_entity::Column::Issue)))
                                .like(pattern),
                        ),
                );
            }
        }

        let date_column = match query.date_field {
            TaskDateField::CreatedAt => task_entity::Column::CreatedAt,
            TaskDateField::UpdatedAt => task_entity::Column::UpdatedAt,
        };
        if let Some(from) = query.from {
            select = select.filter(date_column.gte(from));
        }
        if let Some(until) = query.until {
            select = select.filter(date_column.lt(until));
        }

        select
    }
}

fn to_domain(model: task_entity::Model) -> Result<RepairTask, RepositoryError> {
    let spare_parts: Vec<ConsumedPart> = serde_json::from_value(model.spare_parts)
        .map_err(|e| DbErr::Json(format!("repair task {} spare_parts: {}", model.id, e)))?;
    let status = model.status.parse().map_err(|_| {
        DbErr::Type(format!("repair task {} has unknown status '{}'", model.id, model.status))
    })?;
    let priority = model.priority.parse().map_err(|_| {
        DbErr::Type(format!("repair task {} has unknown priority '{}'", model.id, model.priority))
    })?;

    Ok(RepairTask {
        id: model.id,
        device_name: model.device_name,
        issue: model.issue,
        status,
        priority,
        assigned_user_id: model.assigned_user_id,
        spare_parts,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn to_active_model(task: &RepairTask) -> Result<task_entity::ActiveModel, RepositoryError> {
    let spare_parts =
        serde_json::to_value(&task.spare_parts).map_err(|e| DbErr::Json(e.to_string()))?;

    Ok(task_entity::ActiveModel {
        id: Set(task.id),
        device_name: Set(task.device_name.clone()),
        issue: Set(task.issue.clone()),
        status: Set(task.status.to_string()),
        priority: Set(task.priority.to_string()),
        assigned_user_id: Set(task.assigned_user_id),
        spare_parts: Set(spare_parts),
        created_at: Set(task.created_at),
        updated_at: Set(task.updated_at),
    })
}

#[async_trait]
impl RepairTaskRepository for RepairTaskRepositoryImpl {
    async fn create(&self, task: &RepairTask) -> Result<RepairTask, RepositoryError> {
        let model = to_active_model(task)?;
        model.insert(self.db.as_ref()).await?;
        Ok(task.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<RepairTask>, RepositoryError> {
        let model = task_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        model.map(to_domain).transpose()
    }

    async fn update(&self, task: &RepairTask) -> Result<RepairTask, RepositoryError> {
        let model = to_active_model(task)?;
        let updated = model.update(self.db.as_ref()).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => RepositoryError::NotFound,
            other => other.into(),
        })?;
        to_domain(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = task_entity::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn assign(
        &self,
        id: Uuid,
        user_id: Uuid,
        updated_at: DateTime<FixedOffset>,
    ) -> Result<(), RepositoryError> {
        let result = task_entity::Entity::update_many()
            .col_expr(
                task_entity::Column::AssignedUserId,
                Expr::value(Some(user_id)),
            )
            .col_expr(task_entity::Column::UpdatedAt, Expr::value(updated_at))
            .filter(task_entity::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn count_open_by_technician(&self, user_id: Uuid) -> Result<u64, RepositoryError> {
        let count = task_entity::Entity::find()
            .filter(task_entity::Column::AssignedUserId.eq(user_id))
            .filter(task_entity::Column::Status.ne(TaskStatus::Completed.to_string()))
            .count(self.db.as_ref())
            .await?;
        Ok(count)
    }

    async fn query(&self, query: &RepairTaskQuery) -> Result<Vec<RepairTask>, RepositoryError> {
        let mut select =
            Self::filtered(query).order_by_desc(task_entity::Column::CreatedAt);
        if let Some(limit) = query.limit {
            select = select.limit(limit);
        }
        if let Some(offset) = query.offset {
            select = select.offset(offset);
        }

        let models = select.all(self.db.as_ref()).await?;
        models.into_iter().map(to_domain).collect()
    }

    async fn count(&self, query: &RepairTaskQuery) -> Result<u64, RepositoryError> {
        Ok(Self::filtered(query).count(self.db.as_ref()).await?)
    }

    async fn distinct_device_names(&self) -> Result<Vec<String>, RepositoryError> {
        let names = task_entity::Entity::find()
            .select_only()
            .column(task_entity::Column::DeviceName)
            .distinct()
            .order_by_asc(task_entity::Column::DeviceName)
            .into_tuple::<String>()
            .all(self.db.as_ref())
            .await?;
        Ok(names)
    }
}

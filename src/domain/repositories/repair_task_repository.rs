// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::repair_task::{RepairTask, TaskStatus};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use sea_orm::DbErr;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
}

/// 日期过滤作用的时间列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskDateField {
    #[default]
    CreatedAt,
    UpdatedAt,
}

/// 任务查询参数
#[derive(Debug, Default, Clone)]
pub struct RepairTaskQuery {
    /// 只返回这些状态
    pub statuses: Option<Vec<TaskStatus>>,
    /// 排除某个状态
    pub exclude_status: Option<TaskStatus>,
    pub assigned_user_id: Option<Uuid>,
    /// 设备名称或故障描述包含该文本（不区分大小写）
    pub search: Option<String>,
    pub date_field: TaskDateField,
    pub from: Option<DateTime<FixedOffset>>,
    /// 不含上界
    pub until: Option<DateTime<FixedOffset>>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl RepairTaskQuery {
    /// 未完成任务
    pub fn open() -> Self {
        Self {
            exclude_status: Some(TaskStatus::Completed),
            ..Default::default()
        }
    }

    /// 已完成任务
    pub fn completed() -> Self {
        Self {
            statuses: Some(vec![TaskStatus::Completed]),
            ..Default::default()
        }
    }

    /// 在内存中判断任务是否满足过滤条件，与数据库查询语义一致
    pub fn matches(&self, task: &RepairTask) -> bool {
        if let Some(statuses) = &self.statuses {
            if !statuses.contains(&task.status) {
                return false;
            }
        }
        if self.exclude_status == Some(task.status) {
            return false;
        }
        if let Some(user_id) = self.assigned_user_id {
            if task.assigned_user_id != Some(user_id) {
                return false;
            }
        }
        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            if !task.device_name.to_lowercase().contains(&term)
                && !task.issue.to_lowercase().contains(&term)
            {
                return false;
            }
        }
        let stamp = match self.date_field {
            TaskDateField::CreatedAt => task.created_at,
            TaskDateField::UpdatedAt => task.updated_at,
        };
        if self.from.is_some_and(|from| stamp < from) {
            return false;
        }
        if self.until.is_some_and(|until| stamp >= until) {
            return false;
        }
        true
    }
}

/// 维修任务仓库
#[async_trait]
pub trait RepairTaskRepository: Send + Sync {
    /// 创建新任务
    async fn create(&self, task: &RepairTask) -> Result<RepairTask, RepositoryError>;
    /// 根据ID查找任务
    async fn find_by_id(&self, id: Uuid) -> Result<Option<RepairTask>, RepositoryError>;
    /// 整体更新任务（含备件清单）
    async fn update(&self, task: &RepairTask) -> Result<RepairTask, RepositoryError>;
    /// 删除任务
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
    /// 只写入负责人和更新时间
    async fn assign(
        &self,
        id: Uuid,
        user_id: Uuid,
        updated_at: DateTime<FixedOffset>,
    ) -> Result<(), RepositoryError>;
    /// 统计技术员名下未完成的任务数
    async fn count_open_by_technician(&self, user_id: Uuid) -> Result<u64, RepositoryError>;
    /// 条件查询，按创建时间倒序
    async fn query(&self, query: &RepairTaskQuery) -> Result<Vec<RepairTask>, RepositoryError>;
    /// 条件计数（忽略 limit/offset）
    async fn count(&self, query: &RepairTaskQuery) -> Result<u64, RepositoryError>;
    /// 出现过的设备名称，去重并排序
    async fn distinct_device_names(&self) -> Result<Vec<String>, RepositoryError>;
}

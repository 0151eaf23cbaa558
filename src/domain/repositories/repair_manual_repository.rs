// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::repair_manual::RepairManual;
use crate::domain::repositories::repair_task_repository::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 维修手册仓库
#[async_trait]
pub trait RepairManualRepository: Send + Sync {
    async fn create(&self, manual: &RepairManual) -> Result<RepairManual, RepositoryError>;
    /// 按设备名称和故障描述精确匹配
    async fn find_for_issue(
        &self,
        device_name: &str,
        issue: &str,
    ) -> Result<Option<RepairManual>, RepositoryError>;
    async fn list(&self) -> Result<Vec<RepairManual>, RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

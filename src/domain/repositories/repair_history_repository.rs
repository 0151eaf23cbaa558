// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::repair_history::RepairHistoryEntry;
use crate::domain::repositories::repair_task_repository::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 维修历史仓库（只追加）
#[async_trait]
pub trait RepairHistoryRepository: Send + Sync {
    /// 追加一条历史
    async fn append(&self, entry: &RepairHistoryEntry) -> Result<(), RepositoryError>;
    /// 某个任务的历史，按时间正序
    async fn list_for_task(
        &self,
        repair_task_id: Uuid,
    ) -> Result<Vec<RepairHistoryEntry>, RepositoryError>;
    /// 最近的历史，按时间倒序
    async fn list_recent(&self, limit: u64) -> Result<Vec<RepairHistoryEntry>, RepositoryError>;
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::assignment_rule::AssignmentRule;
use crate::domain::repositories::repair_task_repository::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 分配规则仓库
#[async_trait]
pub trait AssignmentRuleRepository: Send + Sync {
    async fn create(&self, rule: &AssignmentRule) -> Result<AssignmentRule, RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AssignmentRule>, RepositoryError>;
    /// 每台设备最多一条规则
    async fn find_by_device(
        &self,
        device_name: &str,
    ) -> Result<Option<AssignmentRule>, RepositoryError>;
    async fn list(&self) -> Result<Vec<AssignmentRule>, RepositoryError>;
    async fn update(&self, rule: &AssignmentRule) -> Result<AssignmentRule, RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

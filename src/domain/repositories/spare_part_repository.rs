// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::spare_part::SparePart;
use crate::domain::repositories::repair_task_repository::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 备件库存仓库
#[async_trait]
pub trait SparePartRepository: Send + Sync {
    /// 新增库存记录
    async fn create(&self, part: &SparePart) -> Result<SparePart, RepositoryError>;
    /// 根据ID查找
    async fn find_by_id(&self, id: Uuid) -> Result<Option<SparePart>, RepositoryError>;
    /// 按 (名称, 零件号) 查找；零件号不保证唯一，所以返回全部匹配
    async fn find_by_key(
        &self,
        name: &str,
        part_number: &str,
    ) -> Result<Vec<SparePart>, RepositoryError>;
    /// 按名称排序列出，可按名称/NSN/零件号过滤
    async fn list(&self, search: Option<&str>) -> Result<Vec<SparePart>, RepositoryError>;
    /// 直接编辑库存记录
    async fn update(&self, part: &SparePart) -> Result<SparePart, RepositoryError>;
    /// 删除库存记录
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
    /// 原子地执行 `quantity = quantity + delta`，返回调整后的数量
    async fn adjust_quantity(&self, id: Uuid, delta: i32) -> Result<i32, RepositoryError>;
}

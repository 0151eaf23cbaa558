// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::caller::Caller;
use crate::domain::models::repair_history::RepairHistoryEntry;
use crate::domain::models::repair_task::TaskStatus;
use crate::domain::models::spare_part::SparePart;
use crate::domain::repositories::repair_history_repository::RepairHistoryRepository;
use crate::domain::repositories::repair_task_repository::{
    RepairTaskQuery, RepairTaskRepository, TaskDateField,
};
use crate::domain::repositories::spare_part_repository::SparePartRepository;
use crate::utils::errors::ServiceError;
use chrono::{DateTime, Datelike, FixedOffset, TimeZone, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// 默认的低库存阈值
pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 5;

const RECENT_ACTIVITY_LIMIT: u64 = 10;

#[derive(Debug, Clone, Serialize)]
pub struct LowStockPart {
    pub id: uuid::Uuid,
    pub name: String,
    pub part_number: String,
    pub quantity: i32,
}

impl From<&SparePart> for LowStockPart {
    fn from(part: &SparePart) -> Self {
        Self {
            id: part.id,
            name: part.name.clone(),
            part_number: part.part_number.clone(),
            quantity: part.quantity,
        }
    }
}

/// 仪表盘汇总
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub open_tasks: u64,
    pub tasks_by_status: BTreeMap<String, u64>,
    pub completed_this_month: u64,
    pub inventory_lines: usize,
    pub units_on_hand: i64,
    pub low_stock_threshold: i32,
    pub low_stock: Vec<LowStockPart>,
    pub recent_activity: Vec<RepairHistoryEntry>,
}

pub struct DashboardService {
    tasks: Arc<dyn RepairTaskRepository>,
    spare_parts: Arc<dyn SparePartRepository>,
    history: Arc<dyn RepairHistoryRepository>,
    low_stock_threshold: i32,
}

impl DashboardService {
    pub fn new(
        tasks: Arc<dyn RepairTaskRepository>,
        spare_parts: Arc<dyn SparePartRepository>,
        history: Arc<dyn RepairHistoryRepository>,
        low_stock_threshold: i32,
    ) -> Self {
        Self {
            tasks,
            spare_parts,
            history,
            low_stock_threshold,
        }
    }

    /// 汇总任务和库存情况，仅管理员可见
    pub async fn summary(&self, caller: &Caller) -> Result<DashboardSummary, ServiceError> {
        if !caller.is_admin() {
            return Err(ServiceError::Forbidden(format!(
                "role {} may not view the dashboard",
                caller.role
            )));
        }

        let mut tasks_by_status = BTreeMap::new();
        for status in TaskStatus::ALL {
            let query = RepairTaskQuery {
                statuses: Some(vec![status]),
                ..Default::default()
            };
            tasks_by_status.insert(status.to_string(), self.tasks.count(&query).await?);
        }
        let open_tasks = self.tasks.count(&RepairTaskQuery::open()).await?;

        let completed_this_month = self
            .tasks
            .count(&RepairTaskQuery {
                date_field: TaskDateField::UpdatedAt,
                from: Some(start_of_month(Utc::now().fixed_offset())),
                ..RepairTaskQuery::completed()
            })
            .await?;

        let inventory = self.spare_parts.list(None).await?;
        let units_on_hand = inventory.iter().map(|p| i64::from(p.quantity)).sum();
        let mut low_stock: Vec<LowStockPart> = inventory
            .iter()
            .filter(|p| p.quantity <= self.low_stock_threshold)
            .map(LowStockPart::from)
            .collect();
        low_stock.sort_by_key(|p| p.quantity);

        let recent_activity = self.history.list_recent(RECENT_ACTIVITY_LIMIT).await?;

        Ok(DashboardSummary {
            open_tasks,
            tasks_by_status,
            completed_this_month,
            inventory_lines: inventory.len(),
            units_on_hand,
            low_stock_threshold: self.low_stock_threshold,
            low_stock,
            recent_activity,
        })
    }
}

/// 给定时间所在月份的第一天零点（同一时区）
pub(crate) fn start_of_month(now: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    now.timezone()
        .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}

#[cfg(test)]
#[path = "dashboard_service_test.rs"]
mod tests;

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::repair_task::{ConsumedPart, TaskPriority, TaskStatus};
use crate::domain::repositories::repair_task_repository::{RepairTaskQuery, TaskDateField};
use crate::domain::services::repair_task_service::{NewRepairTask, RepairTaskUpdate};
use chrono::{Days, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// 任务上挂载的备件行
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ConsumedPartDto {
    #[validate(length(min = 1, message = "part name cannot be empty"))]
    pub name: String,
    pub nsn: Option<String>,
    #[validate(length(min = 1, message = "part number cannot be empty"))]
    pub part_number: String,
    #[validate(range(
        min = 1,
        max = 100_000,
        message = "part quantity must be between 1 and 100000"
    ))]
    pub quantity: i32,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "part price cannot be negative"))]
    pub price: f64,
    /// 选自库存时带上库存行ID
    pub spare_part_id: Option<Uuid>,
}

impl From<ConsumedPartDto> for ConsumedPart {
    fn from(dto: ConsumedPartDto) -> Self {
        Self {
            name: dto.name,
            nsn: dto.nsn,
            part_number: dto.part_number,
            quantity: dto.quantity,
            price: dto.price,
            spare_part_id: dto.spare_part_id,
        }
    }
}

/// 新建维修任务请求
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRepairTaskRequest {
    #[validate(length(min = 1, message = "device_name cannot be empty"))]
    pub device_name: String,
    #[validate(length(min = 1, message = "issue cannot be empty"))]
    pub issue: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    pub assigned_user_id: Option<Uuid>,
    /// 省略时套用设备的默认备件
    #[validate(nested)]
    pub spare_parts: Option<Vec<ConsumedPartDto>>,
}

impl From<CreateRepairTaskRequest> for NewRepairTask {
    fn from(req: CreateRepairTaskRequest) -> Self {
        Self {
            device_name: req.device_name,
            issue: req.issue,
            status: req.status,
            priority: req.priority,
            assigned_user_id: req.assigned_user_id,
            spare_parts: req
                .spare_parts
                .map(|parts| parts.into_iter().map(Into::into).collect()),
        }
    }
}

/// 编辑维修任务请求，整体替换
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRepairTaskRequest {
    #[validate(length(min = 1, message = "device_name cannot be empty"))]
    pub device_name: String,
    #[validate(length(min = 1, message = "issue cannot be empty"))]
    pub issue: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assigned_user_id: Option<Uuid>,
    #[serde(default)]
    #[validate(nested)]
    pub spare_parts: Vec<ConsumedPartDto>,
}

impl From<UpdateRepairTaskRequest> for RepairTaskUpdate {
    fn from(req: UpdateRepairTaskRequest) -> Self {
        Self {
            device_name: req.device_name,
            issue: req.issue,
            status: req.status,
            priority: req.priority,
            assigned_user_id: req.assigned_user_id,
            spare_parts: req.spare_parts.into_iter().map(Into::into).collect(),
        }
    }
}

/// 任务列表查询参数
///
/// 日期按 UTC 自然日解释，`end_date` 当天整天都包含在内
#[derive(Debug, Default, Deserialize, Validate)]
pub struct TaskListParams {
    pub search: Option<String>,
    #[serde(default)]
    pub date_field: TaskDateField,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[validate(range(min = 1, max = 500))]
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl TaskListParams {
    pub fn into_query(self) -> RepairTaskQuery {
        let midnight = |date: NaiveDate| {
            Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
                .fixed_offset()
        };

        RepairTaskQuery {
            search: self.search.filter(|s| !s.trim().is_empty()),
            date_field: self.date_field,
            from: self.start_date.map(midnight),
            until: self
                .end_date
                .and_then(|date| date.checked_add_days(Days::new(1)))
                .map(midnight),
            limit: self.limit,
            offset: self.offset,
            ..Default::default()
        }
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 维修任务实体
///
/// 一台设备的一次维修工单。任务内嵌一份已消耗备件清单，
/// 该清单是挂载备件时从库存记录复制的快照，而不是对库存行的引用。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairTask {
    /// 任务唯一标识符
    pub id: Uuid,
    /// 设备名称，同时作为分配规则的匹配键
    pub device_name: String,
    /// 故障描述
    pub issue: String,
    /// 任务状态
    pub status: TaskStatus,
    /// 任务优先级
    pub priority: TaskPriority,
    /// 负责技术员（可为空）
    pub assigned_user_id: Option<Uuid>,
    /// 已消耗备件快照，按录入顺序排列
    pub spare_parts: Vec<ConsumedPart>,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
    /// 更新时间
    pub updated_at: DateTime<FixedOffset>,
}

impl RepairTask {
    /// 创建一个新的待处理任务
    pub fn new(device_name: impl Into<String>, issue: impl Into<String>) -> Self {
        let now = Utc::now().fixed_offset();
        Self {
            id: Uuid::new_v4(),
            device_name: device_name.into(),
            issue: issue.into(),
            status: TaskStatus::Pending,
            priority: TaskPriority::Low,
            assigned_user_id: None,
            spare_parts: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// 未完成的任务计入技术员的工作量
    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }
}

/// 任务状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    pub fn is_open(self) -> bool {
        self != TaskStatus::Completed
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::InProgress => write!(f, "in_progress"),
            TaskStatus::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            _ => Err(()),
        }
    }
}

/// 任务优先级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    #[default]
    Low,
    Medium,
    High,
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TaskPriority::Low => write!(f, "low"),
            TaskPriority::Medium => write!(f, "medium"),
            TaskPriority::High => write!(f, "high"),
        }
    }
}

impl FromStr for TaskPriority {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            _ => Err(()),
        }
    }
}

/// 任务上记录的已消耗备件
///
/// 字段名与 `repair_tasks.spare_parts` JSON 列保持一致。
/// `spare_part_id` 是挂载时记下的库存行引用，旧数据可能没有。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumedPart {
    pub name: String,
    #[serde(default)]
    pub nsn: Option<String>,
    pub part_number: String,
    pub quantity: i32,
    #[serde(default)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spare_part_id: Option<Uuid>,
}

impl ConsumedPart {
    pub fn key(&self) -> PartKey {
        PartKey::new(&self.name, &self.part_number)
    }
}

/// 备件匹配键：(名称, 零件号)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartKey {
    pub name: String,
    pub part_number: String,
}

impl PartKey {
    pub fn new(name: &str, part_number: &str) -> Self {
        Self {
            name: name.to_string(),
            part_number: part_number.to_string(),
        }
    }
}

impl fmt::Display for PartKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.part_number)
    }
}

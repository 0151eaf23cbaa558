// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 维修手册，按 (设备名称, 故障描述) 与任务对应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairManual {
    pub id: Uuid,
    pub device_name: String,
    pub issue: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<FixedOffset>,
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 自动分配写入的操作描述
pub const AUTO_ASSIGNED_ACTION: &str = "auto-assigned";

/// 维修历史条目，只追加不修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairHistoryEntry {
    pub id: Uuid,
    pub repair_task_id: Uuid,
    pub action: String,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<FixedOffset>,
}

impl RepairHistoryEntry {
    pub fn new(repair_task_id: Uuid, action: impl Into<String>, user_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            repair_task_id,
            action: action.into(),
            user_id,
            created_at: Utc::now().fixed_offset(),
        }
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 分配规则：设备名称 -> 默认负责技术员，每台设备一条
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRule {
    pub id: Uuid,
    pub device_name: String,
    pub assigned_user_id: Option<Uuid>,
    pub created_at: DateTime<FixedOffset>,
}

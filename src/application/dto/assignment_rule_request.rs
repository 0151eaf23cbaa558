// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// 新增或编辑分配规则请求
#[derive(Debug, Deserialize, Validate)]
pub struct AssignmentRuleRequest {
    #[validate(length(min = 1, message = "device_name cannot be empty"))]
    pub device_name: String,
    /// 为空表示该设备暂不自动分配
    pub assigned_user_id: Option<Uuid>,
}

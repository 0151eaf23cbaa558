// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::caller::Caller;
use crate::utils::errors::ServiceError;

/// HTTP 处理器模块
///
/// - 维修任务（repair_task_handler）：任务增删改查、自动分配、历史和手册
/// - 备件库存（spare_part_handler）
/// - 分配规则（assignment_rule_handler）
/// - 维修手册（repair_manual_handler）
/// - 仪表盘（dashboard_handler）
pub mod assignment_rule_handler;
pub mod dashboard_handler;
pub mod repair_manual_handler;
pub mod repair_task_handler;
pub mod spare_part_handler;

/// 权限不足时返回 Forbidden
pub(crate) fn ensure(allowed: bool, caller: &Caller, action: &str) -> Result<(), ServiceError> {
    if allowed {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(format!(
            "role {} may not {}",
            caller.role, action
        )))
    }
}

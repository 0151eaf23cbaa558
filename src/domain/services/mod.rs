// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 库存对账（stock_reconciler）：把任务备件清单的变化同步到库存
/// - 自动分配（auto_assigner）：按设备规则把任务分配给技术员
/// - 维修任务服务（repair_task_service）：任务的保存、删除和权限检查
/// - 仪表盘服务（dashboard_service）：任务与库存的汇总统计
pub mod auto_assigner;
pub mod dashboard_service;
pub mod repair_task_service;
pub mod stock_reconciler;

#[cfg(test)]
pub(crate) mod test_support;

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// - 维修任务（repair_task）：任务本身以及挂载的备件快照
/// - 备件（spare_part）：库存中的一条备件记录
/// - 分配规则（assignment_rule）：设备名称到技术员的映射
/// - 维修历史（repair_history）：任务上发生的操作记录
/// - 维修手册（repair_manual）：按设备和故障匹配的处理说明
/// - 调用者（caller）：发起操作的用户及其角色
pub mod assignment_rule;
pub mod caller;
pub mod repair_history;
pub mod repair_manual;
pub mod repair_task;
pub mod spare_part;

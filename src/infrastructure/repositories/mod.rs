// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库实现模块
///
/// 提供领域仓库接口的 SeaORM 实现
pub mod assignment_rule_repo_impl;
pub mod repair_history_repo_impl;
pub mod repair_manual_repo_impl;
pub mod repair_task_repo_impl;
pub mod spare_part_repo_impl;

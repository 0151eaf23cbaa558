// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 每张表一个异步仓库 trait，具体实现由基础设施层基于 sea-orm 提供。
/// 错误类型 `RepositoryError` 在各仓库之间共用。
pub mod assignment_rule_repository;
pub mod repair_history_repository;
pub mod repair_manual_repository;
pub mod repair_task_repository;
pub mod spare_part_repository;

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据传输对象模块
///
/// 定义 HTTP 请求体和查询参数，并负责把它们转换成领域输入
pub mod assignment_rule_request;
pub mod repair_manual_request;
pub mod repair_task_request;
pub mod spare_part_request;

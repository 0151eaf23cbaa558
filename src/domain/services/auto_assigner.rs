// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::caller::{Caller, CallerRole};
use crate::domain::models::repair_history::{RepairHistoryEntry, AUTO_ASSIGNED_ACTION};
use crate::domain::models::repair_task::RepairTask;
use crate::domain::repositories::assignment_rule_repository::AssignmentRuleRepository;
use crate::domain::repositories::repair_history_repository::RepairHistoryRepository;
use crate::domain::repositories::repair_task_repository::{RepairTaskRepository, RepositoryError};
use chrono::Utc;
use metrics::counter;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

/// 技术员同时持有的未完成任务上限
pub const DEFAULT_WORKLOAD_CAP: u64 = 3;

/// 自动分配的业务结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AssignmentOutcome {
    /// 已分配；`history_recorded` 为 false 表示历史写入失败但分配已生效
    Assigned {
        technician_id: Uuid,
        open_tasks_before: u64,
        history_recorded: bool,
    },
    /// 该设备没有分配规则
    NoRuleFound { device_name: String },
    /// 规则存在但未指定技术员
    NoTechnicianInRule { rule_id: Uuid },
    /// 技术员已达工作量上限，任务保持原样
    TechnicianAtCapacity {
        technician_id: Uuid,
        open_tasks: u64,
        cap: u64,
    },
}

impl AssignmentOutcome {
    fn label(&self) -> &'static str {
        match self {
            AssignmentOutcome::Assigned { .. } => "assigned",
            AssignmentOutcome::NoRuleFound { .. } => "no_rule",
            AssignmentOutcome::NoTechnicianInRule { .. } => "no_technician",
            AssignmentOutcome::TechnicianAtCapacity { .. } => "at_capacity",
        }
    }
}

#[derive(Error, Debug)]
pub enum AssignmentError {
    #[error("Role {0} may not auto-assign tasks")]
    Forbidden(CallerRole),
    #[error("Persistence error: {0}")]
    Persistence(#[from] RepositoryError),
}

/// 自动分配器
///
/// 按设备名称查找分配规则，检查规则指定技术员的未完成任务数，
/// 未达上限时写入负责人并追加一条历史。分配与历史写入不在同一事务中。
pub struct AutoAssigner {
    tasks: Arc<dyn RepairTaskRepository>,
    rules: Arc<dyn AssignmentRuleRepository>,
    history: Arc<dyn RepairHistoryRepository>,
    workload_cap: u64,
}

impl AutoAssigner {
    pub fn new(
        tasks: Arc<dyn RepairTaskRepository>,
        rules: Arc<dyn AssignmentRuleRepository>,
        history: Arc<dyn RepairHistoryRepository>,
        workload_cap: u64,
    ) -> Self {
        Self {
            tasks,
            rules,
            history,
            workload_cap,
        }
    }

    pub fn workload_cap(&self) -> u64 {
        self.workload_cap
    }

    /// 对任务执行自动分配
    ///
    /// 已分配的任务也会重新按规则评估，可能被改派。
    ///
    /// # 返回值
    ///
    /// * `Ok(AssignmentOutcome)` - 业务结果，包括规则缺失和满负荷
    /// * `Err(AssignmentError)` - 调用者无权限或存储读写失败
    pub async fn auto_assign(
        &self,
        task: &RepairTask,
        caller: &Caller,
    ) -> Result<AssignmentOutcome, AssignmentError> {
        if !caller.can_manage_tasks() {
            return Err(AssignmentError::Forbidden(caller.role));
        }

        let outcome = self.evaluate_and_assign(task).await;
        match &outcome {
            Ok(result) => {
                counter!("auto_assignments_total", "outcome" => result.label()).increment(1)
            }
            Err(_) => counter!("auto_assignments_total", "outcome" => "error").increment(1),
        }
        outcome
    }

    async fn evaluate_and_assign(
        &self,
        task: &RepairTask,
    ) -> Result<AssignmentOutcome, AssignmentError> {
        let rule = match self.rules.find_by_device(&task.device_name).await {
            Ok(Some(rule)) => rule,
            Ok(None) => {
                info!("No assignment rule for device {}", task.device_name);
                return Ok(AssignmentOutcome::NoRuleFound {
                    device_name: task.device_name.clone(),
                });
            }
            Err(e) => {
                error!(
                    "Failed to fetch assignment rule for device {}: {}",
                    task.device_name, e
                );
                return Err(e.into());
            }
        };

        let Some(technician_id) = rule.assigned_user_id else {
            return Ok(AssignmentOutcome::NoTechnicianInRule { rule_id: rule.id });
        };

        let open_tasks = self
            .tasks
            .count_open_by_technician(technician_id)
            .await
            .map_err(|e| {
                error!(
                    "Failed to count open tasks for technician {}: {}",
                    technician_id, e
                );
                e
            })?;

        if open_tasks >= self.workload_cap {
            info!(
                "Technician {} has {} open tasks (cap {}), task {} left as is",
                technician_id, open_tasks, self.workload_cap, task.id
            );
            return Ok(AssignmentOutcome::TechnicianAtCapacity {
                technician_id,
                open_tasks,
                cap: self.workload_cap,
            });
        }

        let now = Utc::now().fixed_offset();
        self.tasks
            .assign(task.id, technician_id, now)
            .await
            .map_err(|e| {
                error!("Failed to assign task {}: {}", task.id, e);
                e
            })?;
        info!("Task {} auto-assigned to {}", task.id, technician_id);

        let entry = RepairHistoryEntry::new(task.id, AUTO_ASSIGNED_ACTION, Some(technician_id));
        let history_recorded = match self.history.append(&entry).await {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    "Task {} was assigned but the history entry could not be written: {}",
                    task.id, e
                );
                false
            }
        };

        Ok(AssignmentOutcome::Assigned {
            technician_id,
            open_tasks_before: open_tasks,
            history_recorded,
        })
    }
}

#[cfg(test)]
#[path = "auto_assigner_test.rs"]
mod tests;

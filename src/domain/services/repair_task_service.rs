// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::caller::Caller;
use crate::domain::models::repair_history::RepairHistoryEntry;
use crate::domain::models::repair_manual::RepairManual;
use crate::domain::models::repair_task::{ConsumedPart, RepairTask, TaskPriority, TaskStatus};
use crate::domain::repositories::repair_history_repository::RepairHistoryRepository;
use crate::domain::repositories::repair_manual_repository::RepairManualRepository;
use crate::domain::repositories::repair_task_repository::{RepairTaskQuery, RepairTaskRepository};
use crate::domain::repositories::spare_part_repository::SparePartRepository;
use crate::domain::services::auto_assigner::{AssignmentOutcome, AutoAssigner};
use crate::domain::services::stock_reconciler::{
    check_quantities, deltas_for_create, deltas_for_delete, reconcile_on_save,
    ReconciliationReport, StockReconciler,
};
use crate::utils::errors::ServiceError;
use chrono::Utc;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// 设备名称 -> 新建任务时默认挂载的零件号
pub type DefaultPartsCatalog = HashMap<String, Vec<String>>;

/// 新建任务的输入
#[derive(Debug, Clone, Default)]
pub struct NewRepairTask {
    pub device_name: String,
    pub issue: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assigned_user_id: Option<Uuid>,
    /// `None` 表示表单没有提交备件，此时套用默认备件
    pub spare_parts: Option<Vec<ConsumedPart>>,
}

/// 编辑任务的输入，整体替换可编辑字段
#[derive(Debug, Clone, Default)]
pub struct RepairTaskUpdate {
    pub device_name: String,
    pub issue: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assigned_user_id: Option<Uuid>,
    pub spare_parts: Vec<ConsumedPart>,
}

/// 保存或删除任务的结果，附带库存对账报告
#[derive(Debug, Clone, Serialize)]
pub struct SaveOutcome {
    pub task: RepairTask,
    pub stock: ReconciliationReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskPage {
    pub items: Vec<RepairTask>,
    pub total: u64,
}

/// 维修任务服务
///
/// 负责任务的新建、编辑和删除，并在任务写入成功后同步库存。
/// 任务写入失败时不会产生任何库存变化；库存调整本身是尽力而为，
/// 失败项体现在返回的对账报告里。
pub struct RepairTaskService {
    tasks: Arc<dyn RepairTaskRepository>,
    spare_parts: Arc<dyn SparePartRepository>,
    history: Arc<dyn RepairHistoryRepository>,
    manuals: Arc<dyn RepairManualRepository>,
    reconciler: StockReconciler,
    assigner: Arc<AutoAssigner>,
    default_parts: DefaultPartsCatalog,
}

impl RepairTaskService {
    pub fn new(
        tasks: Arc<dyn RepairTaskRepository>,
        spare_parts: Arc<dyn SparePartRepository>,
        history: Arc<dyn RepairHistoryRepository>,
        manuals: Arc<dyn RepairManualRepository>,
        assigner: Arc<AutoAssigner>,
        default_parts: DefaultPartsCatalog,
    ) -> Self {
        Self {
            tasks,
            reconciler: StockReconciler::new(spare_parts.clone()),
            spare_parts,
            history,
            manuals,
            assigner,
            default_parts,
        }
    }

    /// 新建任务
    ///
    /// # 参数
    ///
    /// * `caller` - 调用者，需要管理员或主管角色
    /// * `input` - 表单内容
    ///
    /// # 返回值
    ///
    /// 已保存的任务和扣减库存的对账报告
    pub async fn create(
        &self,
        caller: &Caller,
        input: NewRepairTask,
    ) -> Result<SaveOutcome, ServiceError> {
        if !caller.can_manage_tasks() {
            return Err(forbidden(caller, "create repair tasks"));
        }
        validate_fields(&input.device_name, &input.issue)?;

        let parts = match input.spare_parts {
            Some(parts) => parts,
            None => self.default_parts_for(&input.device_name).await,
        };
        check_quantities(&parts)?;

        let mut task = RepairTask::new(input.device_name, input.issue);
        task.status = input.status;
        task.priority = input.priority;
        task.assigned_user_id = input.assigned_user_id;
        task.spare_parts = self.link_parts(parts).await;
        let deltas = deltas_for_create(&task.spare_parts)?;

        let task = self.tasks.create(&task).await.map_err(|e| {
            error!("Failed to create repair task for {}: {}", task.device_name, e);
            e
        })?;
        info!("Created repair task {} for {}", task.id, task.device_name);

        let stock = self.reconciler.apply_deltas(&deltas).await;
        Ok(SaveOutcome { task, stock })
    }

    /// 编辑任务，库存按新旧备件清单的差额调整
    pub async fn update(
        &self,
        caller: &Caller,
        id: Uuid,
        input: RepairTaskUpdate,
    ) -> Result<SaveOutcome, ServiceError> {
        let stored = self.load(id).await?;
        if !caller.can_edit_task(&stored) {
            return Err(forbidden(caller, "edit this repair task"));
        }
        if !caller.can_manage_tasks() && input.assigned_user_id != stored.assigned_user_id {
            return Err(forbidden(caller, "reassign repair tasks"));
        }
        validate_fields(&input.device_name, &input.issue)?;
        check_quantities(&input.spare_parts)?;

        let parts = self.link_parts(input.spare_parts).await;
        let deltas = reconcile_on_save(&stored.spare_parts, &parts)?;

        let updated = RepairTask {
            device_name: input.device_name,
            issue: input.issue,
            status: input.status,
            priority: input.priority,
            assigned_user_id: input.assigned_user_id,
            spare_parts: parts,
            updated_at: Utc::now().fixed_offset(),
            ..stored
        };
        let task = self.tasks.update(&updated).await.map_err(|e| {
            error!("Failed to update repair task {}: {}", id, e);
            e
        })?;
        info!("Updated repair task {} ({})", task.id, task.status);

        let stock = self.reconciler.apply_deltas(&deltas).await;
        Ok(SaveOutcome { task, stock })
    }

    /// 删除任务，所有备件退回库存
    pub async fn delete(&self, caller: &Caller, id: Uuid) -> Result<SaveOutcome, ServiceError> {
        if !caller.can_manage_tasks() {
            return Err(forbidden(caller, "delete repair tasks"));
        }
        let task = self.load(id).await?;
        let deltas = deltas_for_delete(&task.spare_parts)?;

        self.tasks.delete(id).await.map_err(|e| {
            error!("Failed to delete repair task {}: {}", id, e);
            e
        })?;
        info!("Deleted repair task {}", id);

        let stock = self.reconciler.apply_deltas(&deltas).await;
        Ok(SaveOutcome { task, stock })
    }

    pub async fn get(&self, id: Uuid) -> Result<RepairTask, ServiceError> {
        self.load(id).await
    }

    /// 未完成任务；非管理员只能看到分配给自己的任务
    pub async fn list_open(
        &self,
        caller: &Caller,
        filter: RepairTaskQuery,
    ) -> Result<TaskPage, ServiceError> {
        let query = RepairTaskQuery {
            statuses: None,
            exclude_status: Some(TaskStatus::Completed),
            assigned_user_id: caller.task_scope(),
            ..filter
        };
        self.page(&query).await
    }

    /// 已完成任务（维修历史页），对所有角色可见
    pub async fn list_completed(
        &self,
        caller: &Caller,
        filter: RepairTaskQuery,
    ) -> Result<TaskPage, ServiceError> {
        debug!("Listing completed repair tasks for {}", caller.user_id);
        let query = RepairTaskQuery {
            statuses: Some(vec![TaskStatus::Completed]),
            exclude_status: None,
            ..filter
        };
        self.page(&query).await
    }

    /// 按设备名称和故障描述匹配维修手册
    pub async fn manual_for_task(&self, id: Uuid) -> Result<Option<RepairManual>, ServiceError> {
        let task = self.load(id).await?;
        Ok(self
            .manuals
            .find_for_issue(&task.device_name, &task.issue)
            .await?)
    }

    pub async fn history_for_task(
        &self,
        id: Uuid,
    ) -> Result<Vec<RepairHistoryEntry>, ServiceError> {
        self.load(id).await?;
        Ok(self.history.list_for_task(id).await?)
    }

    pub async fn auto_assign(
        &self,
        caller: &Caller,
        id: Uuid,
    ) -> Result<AssignmentOutcome, ServiceError> {
        if !caller.can_manage_tasks() {
            return Err(forbidden(caller, "auto-assign repair tasks"));
        }
        let task = self.load(id).await?;
        Ok(self.assigner.auto_assign(&task, caller).await?)
    }

    pub async fn device_names(&self) -> Result<Vec<String>, ServiceError> {
        Ok(self.tasks.distinct_device_names().await?)
    }

    async fn load(&self, id: Uuid) -> Result<RepairTask, ServiceError> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("repair task {}", id)))
    }

    async fn page(&self, query: &RepairTaskQuery) -> Result<TaskPage, ServiceError> {
        let items = self.tasks.query(query).await?;
        let total = self.tasks.count(query).await?;
        Ok(TaskPage { items, total })
    }

    /// 查找设备的默认备件，每个零件号取一条库存记录，数量为 1
    async fn default_parts_for(&self, device_name: &str) -> Vec<ConsumedPart> {
        let Some(part_numbers) = self.default_parts.get(device_name) else {
            return Vec::new();
        };

        let inventory = match self.spare_parts.list(None).await {
            Ok(inventory) => inventory,
            Err(e) => {
                warn!(
                    "Could not load default parts for device {}: {}",
                    device_name, e
                );
                return Vec::new();
            }
        };

        part_numbers
            .iter()
            .filter_map(|pn| {
                let found = inventory.iter().find(|p| &p.part_number == pn);
                if found.is_none() {
                    warn!("Default part {} for {} is not in inventory", pn, device_name);
                }
                found.map(|p| p.snapshot(1))
            })
            .collect()
    }

    /// 为没有库存行引用的备件补上引用，仅当键唯一匹配时
    async fn link_parts(&self, parts: Vec<ConsumedPart>) -> Vec<ConsumedPart> {
        let mut linked = Vec::with_capacity(parts.len());
        for mut part in parts {
            if part.spare_part_id.is_none() {
                match self
                    .spare_parts
                    .find_by_key(&part.name, &part.part_number)
                    .await
                {
                    Ok(matches) if matches.len() == 1 => {
                        part.spare_part_id = Some(matches[0].id);
                    }
                    Ok(_) => {}
                    Err(e) => warn!("Could not link part {} to inventory: {}", part.key(), e),
                }
            }
            linked.push(part);
        }
        linked
    }
}

fn forbidden(caller: &Caller, action: &str) -> ServiceError {
    ServiceError::Forbidden(format!("role {} may not {}", caller.role, action))
}

fn validate_fields(device_name: &str, issue: &str) -> Result<(), ServiceError> {
    if device_name.trim().is_empty() {
        return Err(ServiceError::Validation(
            "device_name must not be empty".to_string(),
        ));
    }
    if issue.trim().is_empty() {
        return Err(ServiceError::Validation("issue must not be empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
#[path = "repair_task_service_test.rs"]
mod tests;

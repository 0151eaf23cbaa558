// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 服务层单元测试使用的内存仓库

use crate::domain::models::assignment_rule::AssignmentRule;
use crate::domain::models::repair_history::RepairHistoryEntry;
use crate::domain::models::repair_manual::RepairManual;
use crate::domain::models::repair_task::RepairTask;
use crate::domain::models::spare_part::SparePart;
use crate::domain::repositories::assignment_rule_repository::AssignmentRuleRepository;
use crate::domain::repositories::repair_history_repository::RepairHistoryRepository;
use crate::domain::repositories::repair_manual_repository::RepairManualRepository;
use crate::domain::repositories::repair_task_repository::{
    RepairTaskQuery, RepairTaskRepository, RepositoryError,
};
use crate::domain::repositories::spare_part_repository::SparePartRepository;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::DbErr;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

fn injected(what: &str) -> RepositoryError {
    RepositoryError::Database(DbErr::Custom(format!("injected failure: {}", what)))
}

#[derive(Default)]
pub struct MockSparePartRepository {
    pub parts: Mutex<Vec<SparePart>>,
    pub failing_adjustments: Mutex<HashSet<Uuid>>,
    pub fail_lookups: AtomicBool,
}

impl MockSparePartRepository {
    pub fn with_parts(parts: Vec<SparePart>) -> Self {
        Self {
            parts: Mutex::new(parts),
            ..Default::default()
        }
    }

    pub fn quantity_of(&self, id: Uuid) -> i32 {
        self.parts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.quantity)
            .expect("part exists")
    }

    pub fn fail_adjustments_for(&self, id: Uuid) {
        self.failing_adjustments.lock().unwrap().insert(id);
    }
}

#[async_trait]
impl SparePartRepository for MockSparePartRepository {
    async fn create(&self, part: &SparePart) -> Result<SparePart, RepositoryError> {
        self.parts.lock().unwrap().push(part.clone());
        Ok(part.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SparePart>, RepositoryError> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(injected("spare part lookup"));
        }
        Ok(self.parts.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_key(
        &self,
        name: &str,
        part_number: &str,
    ) -> Result<Vec<SparePart>, RepositoryError> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(injected("spare part lookup"));
        }
        Ok(self
            .parts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.name == name && p.part_number == part_number)
            .cloned()
            .collect())
    }

    async fn list(&self, search: Option<&str>) -> Result<Vec<SparePart>, RepositoryError> {
        let term = search.map(str::to_lowercase);
        let mut parts: Vec<SparePart> = self
            .parts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| match &term {
                Some(term) => {
                    p.name.to_lowercase().contains(term)
                        || p.part_number.to_lowercase().contains(term)
                        || p.nsn
                            .as_deref()
                            .is_some_and(|nsn| nsn.to_lowercase().contains(term))
                }
                None => true,
            })
            .cloned()
            .collect();
        parts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(parts)
    }

    async fn update(&self, part: &SparePart) -> Result<SparePart, RepositoryError> {
        let mut parts = self.parts.lock().unwrap();
        let slot = parts
            .iter_mut()
            .find(|p| p.id == part.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = part.clone();
        Ok(part.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut parts = self.parts.lock().unwrap();
        let before = parts.len();
        parts.retain(|p| p.id != id);
        if parts.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn adjust_quantity(&self, id: Uuid, delta: i32) -> Result<i32, RepositoryError> {
        if self.failing_adjustments.lock().unwrap().contains(&id) {
            return Err(injected("stock update"));
        }
        let mut parts = self.parts.lock().unwrap();
        let part = parts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepositoryError::NotFound)?;
        part.quantity += delta;
        Ok(part.quantity)
    }
}

#[derive(Default)]
pub struct MockRepairTaskRepository {
    pub tasks: Mutex<Vec<RepairTask>>,
    pub fail_writes: AtomicBool,
    pub writes: AtomicUsize,
}

impl MockRepairTaskRepository {
    pub fn with_tasks(tasks: Vec<RepairTask>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
            ..Default::default()
        }
    }

    pub fn get(&self, id: Uuid) -> Option<RepairTask> {
        self.tasks.lock().unwrap().iter().find(|t| t.id == id).cloned()
    }

    fn record_write(&self) -> Result<(), RepositoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(injected("task write"));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl RepairTaskRepository for MockRepairTaskRepository {
    async fn create(&self, task: &RepairTask) -> Result<RepairTask, RepositoryError> {
        self.record_write()?;
        self.tasks.lock().unwrap().push(task.clone());
        Ok(task.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<RepairTask>, RepositoryError> {
        Ok(self.get(id))
    }

    async fn update(&self, task: &RepairTask) -> Result<RepairTask, RepositoryError> {
        self.record_write()?;
        let mut tasks = self.tasks.lock().unwrap();
        let slot = tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = task.clone();
        Ok(task.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.record_write()?;
        let mut tasks = self.tasks.lock().unwrap();
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn assign(
        &self,
        id: Uuid,
        user_id: Uuid,
        updated_at: DateTime<FixedOffset>,
    ) -> Result<(), RepositoryError> {
        self.record_write()?;
        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(RepositoryError::NotFound)?;
        task.assigned_user_id = Some(user_id);
        task.updated_at = updated_at;
        Ok(())
    }

    async fn count_open_by_technician(&self, user_id: Uuid) -> Result<u64, RepositoryError> {
        Ok(self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.assigned_user_id == Some(user_id) && t.is_open())
            .count() as u64)
    }

    async fn query(&self, query: &RepairTaskQuery) -> Result<Vec<RepairTask>, RepositoryError> {
        let mut tasks: Vec<RepairTask> = self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .filter(|t| query.matches(t))
            .cloned()
            .collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let offset = query.offset.unwrap_or(0) as usize;
        let limit = query.limit.map(|l| l as usize).unwrap_or(usize::MAX);
        Ok(tasks.into_iter().skip(offset).take(limit).collect())
    }

    async fn count(&self, query: &RepairTaskQuery) -> Result<u64, RepositoryError> {
        Ok(self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .filter(|t| query.matches(t))
            .count() as u64)
    }

    async fn distinct_device_names(&self) -> Result<Vec<String>, RepositoryError> {
        let mut names: Vec<String> = self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .map(|t| t.device_name.clone())
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }
}

#[derive(Default)]
pub struct MockAssignmentRuleRepository {
    pub rules: Mutex<Vec<AssignmentRule>>,
}

impl MockAssignmentRuleRepository {
    pub fn with_rule(device_name: &str, assigned_user_id: Option<Uuid>) -> Self {
        let rule = AssignmentRule {
            id: Uuid::new_v4(),
            device_name: device_name.to_string(),
            assigned_user_id,
            created_at: Utc::now().fixed_offset(),
        };
        Self {
            rules: Mutex::new(vec![rule]),
        }
    }
}

#[async_trait]
impl AssignmentRuleRepository for MockAssignmentRuleRepository {
    async fn create(&self, rule: &AssignmentRule) -> Result<AssignmentRule, RepositoryError> {
        self.rules.lock().unwrap().push(rule.clone());
        Ok(rule.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AssignmentRule>, RepositoryError> {
        Ok(self.rules.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_device(
        &self,
        device_name: &str,
    ) -> Result<Option<AssignmentRule>, RepositoryError> {
        Ok(self
            .rules
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.device_name == device_name)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<AssignmentRule>, RepositoryError> {
        Ok(self.rules.lock().unwrap().clone())
    }

    async fn update(&self, rule: &AssignmentRule) -> Result<AssignmentRule, RepositoryError> {
        let mut rules = self.rules.lock().unwrap();
        let slot = rules
            .iter_mut()
            .find(|r| r.id == rule.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = rule.clone();
        Ok(rule.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut rules = self.rules.lock().unwrap();
        let before = rules.len();
        rules.retain(|r| r.id != id);
        if rules.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MockRepairHistoryRepository {
    pub entries: Mutex<Vec<RepairHistoryEntry>>,
    pub fail_append: AtomicBool,
}

#[async_trait]
impl RepairHistoryRepository for MockRepairHistoryRepository {
    async fn append(&self, entry: &RepairHistoryEntry) -> Result<(), RepositoryError> {
        if self.fail_append.load(Ordering::SeqCst) {
            return Err(injected("history append"));
        }
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn list_for_task(
        &self,
        repair_task_id: Uuid,
    ) -> Result<Vec<RepairHistoryEntry>, RepositoryError> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.repair_task_id == repair_task_id)
            .cloned()
            .collect())
    }

    async fn list_recent(&self, limit: u64) -> Result<Vec<RepairHistoryEntry>, RepositoryError> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.iter().rev().take(limit as usize).cloned().collect())
    }
}

#[derive(Default)]
pub struct MockRepairManualRepository {
    pub manuals: Mutex<Vec<RepairManual>>,
}

#[async_trait]
impl RepairManualRepository for MockRepairManualRepository {
    async fn create(&self, manual: &RepairManual) -> Result<RepairManual, RepositoryError> {
        self.manuals.lock().unwrap().push(manual.clone());
        Ok(manual.clone())
    }

    async fn find_for_issue(
        &self,
        device_name: &str,
        issue: &str,
    ) -> Result<Option<RepairManual>, RepositoryError> {
        Ok(self
            .manuals
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.device_name == device_name && m.issue == issue)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<RepairManual>, RepositoryError> {
        Ok(self.manuals.lock().unwrap().clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut manuals = self.manuals.lock().unwrap();
        let before = manuals.len();
        manuals.retain(|m| m.id != id);
        if manuals.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

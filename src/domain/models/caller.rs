// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::repair_task::RepairTask;

/// 调用者角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallerRole {
    Admin,
    Officer,
    Technician,
}

impl fmt::Display for CallerRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CallerRole::Admin => write!(f, "admin"),
            CallerRole::Officer => write!(f, "officer"),
            CallerRole::Technician => write!(f, "technician"),
        }
    }
}

impl FromStr for CallerRole {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(CallerRole::Admin),
            "officer" => Ok(CallerRole::Officer),
            "technician" => Ok(CallerRole::Technician),
            _ => Err(()),
        }
    }
}

/// 发起操作的用户
///
/// 由表示层从认证信息中解析后显式传入各个服务，
/// 服务内部不读取任何全局的"当前用户"状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: Uuid,
    pub role: CallerRole,
}

impl Caller {
    pub fn new(user_id: Uuid, role: CallerRole) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == CallerRole::Admin
    }

    /// 新建、删除任务以及触发自动分配
    pub fn can_manage_tasks(&self) -> bool {
        matches!(self.role, CallerRole::Admin | CallerRole::Officer)
    }

    /// 技术员只能编辑分配给自己的任务
    pub fn can_edit_task(&self, task: &RepairTask) -> bool {
        self.can_manage_tasks() || task.assigned_user_id == Some(self.user_id)
    }

    pub fn can_manage_inventory(&self) -> bool {
        matches!(self.role, CallerRole::Admin | CallerRole::Officer)
    }

    /// 非管理员的任务列表只包含分配给自己的任务
    pub fn task_scope(&self) -> Option<Uuid> {
        if self.is_admin() {
            None
        } else {
            Some(self.user_id)
        }
    }
}

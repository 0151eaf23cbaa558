// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repair_task::{ConsumedPart, PartKey};

/// 库存备件记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparePart {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub nsn: Option<String>,
    pub part_number: String,
    /// 在库数量。不允许为负是业务意图，存储层并不强制
    pub quantity: i32,
    pub price: f64,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl SparePart {
    pub fn new(name: impl Into<String>, part_number: impl Into<String>, quantity: i32) -> Self {
        let now = Utc::now().fixed_offset();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            nsn: None,
            part_number: part_number.into(),
            quantity,
            price: 0.0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn key(&self) -> PartKey {
        PartKey::new(&self.name, &self.part_number)
    }

    /// 生成挂到任务上的快照，并记下库存行引用
    pub fn snapshot(&self, quantity: i32) -> ConsumedPart {
        ConsumedPart {
            name: self.name.clone(),
            nsn: self.nsn.clone(),
            part_number: self.part_number.clone(),
            quantity,
            price: self.price,
            spare_part_id: Some(self.id),
        }
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::repair_manual::RepairManual;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRepairManualRequest {
    #[validate(length(min = 1, message = "device_name cannot be empty"))]
    pub device_name: String,
    #[validate(length(min = 1, message = "issue cannot be empty"))]
    pub issue: String,
    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: String,
    pub content: String,
}

impl From<CreateRepairManualRequest> for RepairManual {
    fn from(req: CreateRepairManualRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            device_name: req.device_name,
            issue: req.issue,
            title: req.title,
            content: req.content,
            created_at: Utc::now().fixed_offset(),
        }
    }
}

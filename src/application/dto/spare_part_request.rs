// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::spare_part::SparePart;
use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

/// 新增或编辑库存记录请求
#[derive(Debug, Deserialize, Validate)]
pub struct SparePartRequest {
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: String,
    pub description: Option<String>,
    pub nsn: Option<String>,
    #[validate(length(min = 1, message = "part_number cannot be empty"))]
    pub part_number: String,
    #[validate(range(min = 0, message = "quantity cannot be negative"))]
    pub quantity: i32,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "price cannot be negative"))]
    pub price: f64,
}

impl SparePartRequest {
    pub fn into_new_part(self) -> SparePart {
        let mut part = SparePart::new(self.name, self.part_number, self.quantity);
        part.description = self.description;
        part.nsn = self.nsn;
        part.price = self.price;
        part
    }

    /// 覆盖已有记录的可编辑字段
    pub fn apply_to(self, existing: SparePart) -> SparePart {
        SparePart {
            name: self.name,
            description: self.description,
            nsn: self.nsn,
            part_number: self.part_number,
            quantity: self.quantity,
            price: self.price,
            updated_at: Utc::now().fixed_offset(),
            ..existing
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SparePartListParams {
    pub search: Option<String>,
}

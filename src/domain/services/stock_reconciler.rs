// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::repair_task::{ConsumedPart, PartKey};
use crate::domain::repositories::repair_task_repository::RepositoryError;
use crate::domain::repositories::spare_part_repository::SparePartRepository;
use metrics::counter;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// 库存调整量
///
/// 正数表示退回库存，负数表示从库存扣减。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockDelta {
    pub key: PartKey,
    pub spare_part_id: Option<Uuid>,
    pub delta: i32,
}

/// 单个备件在一张任务上（合并同键行之后）允许的最大数量
pub const MAX_PART_QUANTITY: i32 = 100_000;

/// 备件清单的数量不合法
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    #[error("quantity for part {key} must be positive, got {quantity}")]
    NotPositive { key: PartKey, quantity: i32 },
    #[error("total quantity {total} for part {key} exceeds the limit of {max}")]
    TooLarge { key: PartKey, total: i64, max: i32 },
    #[error("stock adjustment {delta} for part {key} is out of range")]
    DeltaOutOfRange { key: PartKey, delta: i64 },
}

/// 同一清单中按键合并后的备件行
struct PartLine {
    key: PartKey,
    spare_part_id: Option<Uuid>,
    quantity: i64,
}

fn aggregate(parts: &[ConsumedPart]) -> Vec<PartLine> {
    let mut lines: Vec<PartLine> = Vec::with_capacity(parts.len());
    for part in parts {
        let key = part.key();
        match lines.iter_mut().find(|line| line.key == key) {
            Some(line) => {
                line.quantity += i64::from(part.quantity);
                line.spare_part_id = line.spare_part_id.or(part.spare_part_id);
            }
            None => lines.push(PartLine {
                key,
                spare_part_id: part.spare_part_id,
                quantity: i64::from(part.quantity),
            }),
        }
    }
    lines
}

/// 检查即将保存的备件清单
///
/// 每行数量必须为正，同键行合并后不超过 [`MAX_PART_QUANTITY`]。
pub fn check_quantities(parts: &[ConsumedPart]) -> Result<(), QuantityError> {
    if let Some(part) = parts.iter().find(|p| p.quantity <= 0) {
        return Err(QuantityError::NotPositive {
            key: part.key(),
            quantity: part.quantity,
        });
    }
    match aggregate(parts)
        .into_iter()
        .find(|line| line.quantity > i64::from(MAX_PART_QUANTITY))
    {
        Some(line) => Err(QuantityError::TooLarge {
            key: line.key,
            total: line.quantity,
            max: MAX_PART_QUANTITY,
        }),
        None => Ok(()),
    }
}

fn to_delta(
    key: &PartKey,
    spare_part_id: Option<Uuid>,
    delta: i64,
) -> Result<StockDelta, QuantityError> {
    let delta = i32::try_from(delta).map_err(|_| QuantityError::DeltaOutOfRange {
        key: key.clone(),
        delta,
    })?;
    Ok(StockDelta {
        key: key.clone(),
        spare_part_id,
        delta,
    })
}

/// 计算任务保存前后备件清单的库存调整量
///
/// 按 (名称, 零件号) 匹配：
/// - 两边都有且数量不同：`旧数量 - 新数量`
/// - 只在旧清单中（被移除）：`+旧数量`
/// - 只在新清单中（新增）：`-新数量`
/// - 数量不变的不产生调整
///
/// 输出顺序：先按旧清单出现顺序，再追加仅新清单中的备件。
/// 数量在 64 位上累加，调整量超出 `i32` 时返回错误而不是回绕。
pub fn reconcile_on_save(
    existing: &[ConsumedPart],
    updated: &[ConsumedPart],
) -> Result<Vec<StockDelta>, QuantityError> {
    let old_lines = aggregate(existing);
    let new_lines = aggregate(updated);
    let mut deltas = Vec::new();

    for old in &old_lines {
        match new_lines.iter().find(|line| line.key == old.key) {
            Some(new) if new.quantity != old.quantity => deltas.push(to_delta(
                &old.key,
                new.spare_part_id.or(old.spare_part_id),
                old.quantity - new.quantity,
            )?),
            Some(_) => {}
            None => deltas.push(to_delta(&old.key, old.spare_part_id, old.quantity)?),
        }
    }

    for new in &new_lines {
        if !old_lines.iter().any(|line| line.key == new.key) {
            deltas.push(to_delta(&new.key, new.spare_part_id, -new.quantity)?);
        }
    }

    deltas.retain(|d| d.delta != 0);
    Ok(deltas)
}

/// 新建任务：全部扣减
pub fn deltas_for_create(parts: &[ConsumedPart]) -> Result<Vec<StockDelta>, QuantityError> {
    reconcile_on_save(&[], parts)
}

/// 删除任务：全部退回
pub fn deltas_for_delete(parts: &[ConsumedPart]) -> Result<Vec<StockDelta>, QuantityError> {
    reconcile_on_save(parts, &[])
}

/// 单条调整失败的原因
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AdjustmentFailureReason {
    /// 库存中没有对应记录
    PartNotFound,
    /// 多条库存记录共用同一个 (名称, 零件号)
    AmbiguousPart { matches: usize },
    /// 读写库存失败
    Persistence { message: String },
}

impl fmt::Display for AdjustmentFailureReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AdjustmentFailureReason::PartNotFound => write!(f, "no matching inventory record"),
            AdjustmentFailureReason::AmbiguousPart { matches } => {
                write!(f, "{} inventory records share this key", matches)
            }
            AdjustmentFailureReason::Persistence { message } => write!(f, "{}", message),
        }
    }
}

impl From<RepositoryError> for AdjustmentFailureReason {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => AdjustmentFailureReason::PartNotFound,
            other => AdjustmentFailureReason::Persistence {
                message: other.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedAdjustment {
    pub spare_part_id: Uuid,
    pub key: PartKey,
    pub delta: i32,
    pub quantity_after: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdjustmentFailure {
    pub key: PartKey,
    pub delta: i32,
    pub reason: AdjustmentFailureReason,
}

/// 一次库存对账的结果
///
/// 已执行的调整不会因为其他调整失败而回滚。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconciliationReport {
    pub applied: Vec<AppliedAdjustment>,
    pub failed: Vec<AdjustmentFailure>,
}

impl ReconciliationReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// 实际写入库存的调整量之和
    pub fn net_applied(&self) -> i64 {
        self.applied.iter().map(|a| i64::from(a.delta)).sum()
    }
}

/// 库存对账器
///
/// 把任务备件清单的变化同步到库存数量上。每条调整独立执行，
/// 单条失败只记录在报告里，不影响其余调整。
pub struct StockReconciler {
    spare_parts: Arc<dyn SparePartRepository>,
}

impl StockReconciler {
    pub fn new(spare_parts: Arc<dyn SparePartRepository>) -> Self {
        Self { spare_parts }
    }

    /// 依次执行调整
    pub async fn apply_deltas(&self, deltas: &[StockDelta]) -> ReconciliationReport {
        let mut report = ReconciliationReport::default();

        for delta in deltas {
            match self.apply_one(delta).await {
                Ok(applied) => {
                    counter!("stock_adjustments_total", "outcome" => "applied").increment(1);
                    if applied.quantity_after < 0 {
                        warn!(
                            "Stock for part {} went negative ({}) after adjustment {:+}",
                            applied.key, applied.quantity_after, applied.delta
                        );
                    } else {
                        debug!(
                            "Adjusted stock for part {} by {:+}, now {}",
                            applied.key, applied.delta, applied.quantity_after
                        );
                    }
                    report.applied.push(applied);
                }
                Err(reason) => {
                    counter!("stock_adjustments_total", "outcome" => "failed").increment(1);
                    warn!(
                        "Skipping stock adjustment {:+} for part {}: {}",
                        delta.delta, delta.key, reason
                    );
                    report.failed.push(AdjustmentFailure {
                        key: delta.key.clone(),
                        delta: delta.delta,
                        reason,
                    });
                }
            }
        }

        if !deltas.is_empty() {
            info!(
                "Stock reconciliation finished: {} applied, {} failed",
                report.applied.len(),
                report.failed.len()
            );
        }

        report
    }

    async fn apply_one(
        &self,
        delta: &StockDelta,
    ) -> Result<AppliedAdjustment, AdjustmentFailureReason> {
        let spare_part_id = self.resolve(delta).await?;
        let quantity_after = self
            .spare_parts
            .adjust_quantity(spare_part_id, delta.delta)
            .await?;

        Ok(AppliedAdjustment {
            spare_part_id,
            key: delta.key.clone(),
            delta: delta.delta,
            quantity_after,
        })
    }

    /// 先按记录的库存行引用查找，找不到再按 (名称, 零件号) 查找
    async fn resolve(&self, delta: &StockDelta) -> Result<Uuid, AdjustmentFailureReason> {
        if let Some(id) = delta.spare_part_id {
            if let Some(part) = self.spare_parts.find_by_id(id).await? {
                return Ok(part.id);
            }
            debug!(
                "Inventory record {} for part {} is gone, falling back to key lookup",
                id, delta.key
            );
        }

        let mut matches = self
            .spare_parts
            .find_by_key(&delta.key.name, &delta.key.part_number)
            .await?;

        if matches.len() > 1 {
            return Err(AdjustmentFailureReason::AmbiguousPart {
                matches: matches.len(),
            });
        }

        matches
            .pop()
            .map(|part| part.id)
            .ok_or(AdjustmentFailureReason::PartNotFound)
    }
}

#[cfg(test)]
#[path = "stock_reconciler_test.rs"]
mod tests;

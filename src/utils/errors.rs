// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

use crate::domain::repositories::repair_task_repository::RepositoryError;
use crate::domain::services::auto_assigner::AssignmentError;
use crate::domain::services::stock_reconciler::QuantityError;

/// 服务层错误类型
///
/// 业务上的预期结果（如技术员满负荷、备件找不到）不走这里，
/// 它们作为结果值返回给调用方。
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Persistence error: {0}")]
    Persistence(#[from] RepositoryError),
}

impl From<AssignmentError> for ServiceError {
    fn from(err: AssignmentError) -> Self {
        match err {
            AssignmentError::Forbidden(role) => {
                ServiceError::Forbidden(format!("role {} may not auto-assign tasks", role))
            }
            AssignmentError::Persistence(e) => ServiceError::Persistence(e),
        }
    }
}

impl From<QuantityError> for ServiceError {
    fn from(err: QuantityError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::repair_task_request::{
    CreateRepairTaskRequest, TaskListParams, UpdateRepairTaskRequest,
};
use crate::domain::models::repair_history::RepairHistoryEntry;
use crate::domain::models::repair_manual::RepairManual;
use crate::domain::models::repair_task::RepairTask;
use crate::domain::services::auto_assigner::AssignmentOutcome;
use crate::domain::services::repair_task_service::{RepairTaskService, SaveOutcome, TaskPage};
use crate::presentation::errors::AppError;
use crate::presentation::extractors::caller::AuthenticatedCaller;
use crate::utils::errors::ServiceError;
use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// 未完成任务列表
pub async fn list_open_tasks(
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Extension(service): Extension<Arc<RepairTaskService>>,
    Query(params): Query<TaskListParams>,
) -> Result<Json<TaskPage>, AppError> {
    params.validate()?;
    let page = service.list_open(&caller, params.into_query()).await?;
    Ok(Json(page))
}

/// 维修历史页：已完成任务
pub async fn list_completed_tasks(
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Extension(service): Extension<Arc<RepairTaskService>>,
    Query(params): Query<TaskListParams>,
) -> Result<Json<TaskPage>, AppError> {
    params.validate()?;
    let page = service.list_completed(&caller, params.into_query()).await?;
    Ok(Json(page))
}

pub async fn create_task(
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Extension(service): Extension<Arc<RepairTaskService>>,
    Json(payload): Json<CreateRepairTaskRequest>,
) -> Result<(StatusCode, Json<SaveOutcome>), AppError> {
    payload.validate()?;
    let outcome = service.create(&caller, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

pub async fn get_task(
    AuthenticatedCaller(_caller): AuthenticatedCaller,
    Extension(service): Extension<Arc<RepairTaskService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<RepairTask>, AppError> {
    Ok(Json(service.get(id).await?))
}

pub async fn update_task(
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Extension(service): Extension<Arc<RepairTaskService>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRepairTaskRequest>,
) -> Result<Json<SaveOutcome>, AppError> {
    payload.validate()?;
    let outcome = service.update(&caller, id, payload.into()).await?;
    Ok(Json(outcome))
}

pub async fn delete_task(
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Extension(service): Extension<Arc<RepairTaskService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SaveOutcome>, AppError> {
    Ok(Json(service.delete(&caller, id).await?))
}

/// 自动分配
///
/// 业务结果通过状态码区分：已分配 200，无规则 404，规则未指定技术员 422，满负荷 409
pub async fn auto_assign_task(
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Extension(service): Extension<Arc<RepairTaskService>>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<AssignmentOutcome>), AppError> {
    let outcome = service.auto_assign(&caller, id).await?;
    let status = match &outcome {
        AssignmentOutcome::Assigned { .. } => StatusCode::OK,
        AssignmentOutcome::NoRuleFound { .. } => StatusCode::NOT_FOUND,
        AssignmentOutcome::NoTechnicianInRule { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        AssignmentOutcome::TechnicianAtCapacity { .. } => StatusCode::CONFLICT,
    };
    Ok((status, Json(outcome)))
}

pub async fn task_history(
    AuthenticatedCaller(_caller): AuthenticatedCaller,
    Extension(service): Extension<Arc<RepairTaskService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<RepairHistoryEntry>>, AppError> {
    Ok(Json(service.history_for_task(id).await?))
}

pub async fn task_manual(
    AuthenticatedCaller(_caller): AuthenticatedCaller,
    Extension(service): Extension<Arc<RepairTaskService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<RepairManual>, AppError> {
    let manual = service.manual_for_task(id).await?.ok_or_else(|| {
        ServiceError::NotFound(format!("no repair manual matches task {}", id))
    })?;
    Ok(Json(manual))
}

/// 出现过的设备名称，用于表单下拉框
pub async fn list_devices(
    AuthenticatedCaller(_caller): AuthenticatedCaller,
    Extension(service): Extension<Arc<RepairTaskService>>,
) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(service.device_names().await?))
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::assignment_rule_request::AssignmentRuleRequest;
use crate::domain::models::assignment_rule::AssignmentRule;
use crate::domain::repositories::assignment_rule_repository::AssignmentRuleRepository;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::caller::AuthenticatedCaller;
use crate::presentation::handlers::ensure;
use crate::utils::errors::ServiceError;
use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

pub async fn list_rules(
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Extension(repo): Extension<Arc<dyn AssignmentRuleRepository>>,
) -> Result<Json<Vec<AssignmentRule>>, AppError> {
    ensure(caller.is_admin(), &caller, "manage assignment rules")?;
    Ok(Json(repo.list().await?))
}

/// 每台设备只能有一条规则，重复时返回 409
pub async fn create_rule(
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Extension(repo): Extension<Arc<dyn AssignmentRuleRepository>>,
    Json(payload): Json<AssignmentRuleRequest>,
) -> Result<(StatusCode, Json<AssignmentRule>), AppError> {
    ensure(caller.is_admin(), &caller, "manage assignment rules")?;
    payload.validate()?;

    if repo.find_by_device(&payload.device_name).await?.is_some() {
        return Err(ServiceError::Conflict(format!(
            "an assignment rule for {} already exists",
            payload.device_name
        ))
        .into());
    }

    let rule = AssignmentRule {
        id: Uuid::new_v4(),
        device_name: payload.device_name,
        assigned_user_id: payload.assigned_user_id,
        created_at: Utc::now().fixed_offset(),
    };
    let rule = repo.create(&rule).await?;
    info!("Created assignment rule {} for {}", rule.id, rule.device_name);
    Ok((StatusCode::CREATED, Json(rule)))
}

pub async fn update_rule(
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Extension(repo): Extension<Arc<dyn AssignmentRuleRepository>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignmentRuleRequest>,
) -> Result<Json<AssignmentRule>, AppError> {
    ensure(caller.is_admin(), &caller, "manage assignment rules")?;
    payload.validate()?;

    let existing = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("assignment rule {}", id)))?;
    if let Some(other) = repo.find_by_device(&payload.device_name).await? {
        if other.id != id {
            return Err(ServiceError::Conflict(format!(
                "an assignment rule for {} already exists",
                payload.device_name
            ))
            .into());
        }
    }

    let rule = repo
        .update(&AssignmentRule {
            device_name: payload.device_name,
            assigned_user_id: payload.assigned_user_id,
            ..existing
        })
        .await?;
    info!("Updated assignment rule {}", rule.id);
    Ok(Json(rule))
}

pub async fn delete_rule(
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Extension(repo): Extension<Arc<dyn AssignmentRuleRepository>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    ensure(caller.is_admin(), &caller, "manage assignment rules")?;
    repo.delete(id).await?;
    info!("Deleted assignment rule {}", id);
    Ok(StatusCode::NO_CONTENT)
}

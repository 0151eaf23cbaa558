// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::repair_manual_request::CreateRepairManualRequest;
use crate::domain::models::repair_manual::RepairManual;
use crate::domain::repositories::repair_manual_repository::RepairManualRepository;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::caller::AuthenticatedCaller;
use crate::presentation::handlers::ensure;
use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

pub async fn list_manuals(
    AuthenticatedCaller(_caller): AuthenticatedCaller,
    Extension(repo): Extension<Arc<dyn RepairManualRepository>>,
) -> Result<Json<Vec<RepairManual>>, AppError> {
    Ok(Json(repo.list().await?))
}

pub async fn create_manual(
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Extension(repo): Extension<Arc<dyn RepairManualRepository>>,
    Json(payload): Json<CreateRepairManualRequest>,
) -> Result<(StatusCode, Json<RepairManual>), AppError> {
    ensure(caller.can_manage_tasks(), &caller, "edit repair manuals")?;
    payload.validate()?;

    let manual = repo.create(&payload.into()).await?;
    info!(
        "Added repair manual {} for {} / {}",
        manual.id, manual.device_name, manual.issue
    );
    Ok((StatusCode::CREATED, Json(manual)))
}

pub async fn delete_manual(
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Extension(repo): Extension<Arc<dyn RepairManualRepository>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    ensure(caller.can_manage_tasks(), &caller, "edit repair manuals")?;
    repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::spare_part_request::{SparePartListParams, SparePartRequest};
use crate::domain::models::spare_part::SparePart;
use crate::domain::repositories::spare_part_repository::SparePartRepository;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::caller::AuthenticatedCaller;
use crate::presentation::handlers::ensure;
use crate::utils::errors::ServiceError;
use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

pub async fn list_parts(
    AuthenticatedCaller(_caller): AuthenticatedCaller,
    Extension(repo): Extension<Arc<dyn SparePartRepository>>,
    Query(params): Query<SparePartListParams>,
) -> Result<Json<Vec<SparePart>>, AppError> {
    let parts = repo.list(params.search.as_deref()).await?;
    Ok(Json(parts))
}

pub async fn get_part(
    AuthenticatedCaller(_caller): AuthenticatedCaller,
    Extension(repo): Extension<Arc<dyn SparePartRepository>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SparePart>, AppError> {
    let part = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("spare part {}", id)))?;
    Ok(Json(part))
}

pub async fn create_part(
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Extension(repo): Extension<Arc<dyn SparePartRepository>>,
    Json(payload): Json<SparePartRequest>,
) -> Result<(StatusCode, Json<SparePart>), AppError> {
    ensure(caller.can_manage_inventory(), &caller, "edit inventory")?;
    payload.validate()?;

    let part = repo.create(&payload.into_new_part()).await?;
    info!("Added spare part {} ({})", part.id, part.key());
    Ok((StatusCode::CREATED, Json(part)))
}

/// 直接编辑库存记录，不经过任务对账
pub async fn update_part(
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Extension(repo): Extension<Arc<dyn SparePartRepository>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SparePartRequest>,
) -> Result<Json<SparePart>, AppError> {
    ensure(caller.can_manage_inventory(), &caller, "edit inventory")?;
    payload.validate()?;

    let existing = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("spare part {}", id)))?;
    let part = repo.update(&payload.apply_to(existing)).await?;
    info!("Updated spare part {} (quantity {})", part.id, part.quantity);
    Ok(Json(part))
}

pub async fn delete_part(
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Extension(repo): Extension<Arc<dyn SparePartRepository>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    ensure(caller.can_manage_inventory(), &caller, "edit inventory")?;
    repo.delete(id).await?;
    info!("Deleted spare part {}", id);
    Ok(StatusCode::NO_CONTENT)
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::dashboard_service::{DashboardService, DashboardSummary};
use crate::presentation::errors::AppError;
use crate::presentation::extractors::caller::AuthenticatedCaller;
use axum::extract::{Extension, Json};
use std::sync::Arc;

pub async fn summary(
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Extension(service): Extension<Arc<DashboardService>>,
) -> Result<Json<DashboardSummary>, AppError> {
    Ok(Json(service.summary(&caller).await?))
}

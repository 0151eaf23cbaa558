// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use crate::domain::repositories::assignment_rule_repository::AssignmentRuleRepository;
use crate::domain::repositories::repair_history_repository::RepairHistoryRepository;
use crate::domain::repositories::repair_manual_repository::RepairManualRepository;
use crate::domain::repositories::repair_task_repository::RepairTaskRepository;
use crate::domain::repositories::spare_part_repository::SparePartRepository;
use crate::domain::services::auto_assigner::AutoAssigner;
use crate::domain::services::dashboard_service::DashboardService;
use crate::domain::services::repair_task_service::RepairTaskService;
use crate::infrastructure::repositories::assignment_rule_repo_impl::AssignmentRuleRepositoryImpl;
use crate::infrastructure::repositories::repair_history_repo_impl::RepairHistoryRepositoryImpl;
use crate::infrastructure::repositories::repair_manual_repo_impl::RepairManualRepositoryImpl;
use crate::infrastructure::repositories::repair_task_repo_impl::RepairTaskRepositoryImpl;
use crate::infrastructure::repositories::spare_part_repo_impl::SparePartRepositoryImpl;
use crate::presentation::handlers::{
    assignment_rule_handler, dashboard_handler, repair_manual_handler, repair_task_handler,
    spare_part_handler,
};
use axum::{
    routing::{delete, get, post, put},
    Extension, Router,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 路由共享的仓库和服务
#[derive(Clone)]
pub struct AppContext {
    pub spare_parts: Arc<dyn SparePartRepository>,
    pub assignment_rules: Arc<dyn AssignmentRuleRepository>,
    pub repair_manuals: Arc<dyn RepairManualRepository>,
    pub repair_tasks: Arc<RepairTaskService>,
    pub dashboard: Arc<DashboardService>,
}

impl AppContext {
    /// 基于数据库连接和配置装配所有仓库与服务
    pub fn new(db: Arc<DatabaseConnection>, settings: &Settings) -> Self {
        let tasks: Arc<dyn RepairTaskRepository> =
            Arc::new(RepairTaskRepositoryImpl::new(db.clone()));
        let spare_parts: Arc<dyn SparePartRepository> =
            Arc::new(SparePartRepositoryImpl::new(db.clone()));
        let assignment_rules: Arc<dyn AssignmentRuleRepository> =
            Arc::new(AssignmentRuleRepositoryImpl::new(db.clone()));
        let history: Arc<dyn RepairHistoryRepository> =
            Arc::new(RepairHistoryRepositoryImpl::new(db.clone()));
        let repair_manuals: Arc<dyn RepairManualRepository> =
            Arc::new(RepairManualRepositoryImpl::new(db));

        let assigner = Arc::new(AutoAssigner::new(
            tasks.clone(),
            assignment_rules.clone(),
            history.clone(),
            settings.assignment.workload_cap,
        ));
        let repair_tasks = Arc::new(RepairTaskService::new(
            tasks.clone(),
            spare_parts.clone(),
            history.clone(),
            repair_manuals.clone(),
            assigner,
            settings.default_parts_catalog(),
        ));
        let dashboard = Arc::new(DashboardService::new(
            tasks,
            spare_parts.clone(),
            history,
            settings.inventory.low_stock_threshold,
        ));

        Self {
            spare_parts,
            assignment_rules,
            repair_manuals,
            repair_tasks,
            dashboard,
        }
    }
}

/// 创建应用路由
///
/// # 返回值
///
/// 返回挂好共享状态和请求追踪的路由
pub fn app(ctx: AppContext) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let api_routes = Router::new()
        .route(
            "/v1/repair-tasks",
            get(repair_task_handler::list_open_tasks).post(repair_task_handler::create_task),
        )
        .route(
            "/v1/repair-tasks/{id}",
            get(repair_task_handler::get_task)
                .put(repair_task_handler::update_task)
                .delete(repair_task_handler::delete_task),
        )
        .route(
            "/v1/repair-tasks/{id}/auto-assign",
            post(repair_task_handler::auto_assign_task),
        )
        .route(
            "/v1/repair-tasks/{id}/history",
            get(repair_task_handler::task_history),
        )
        .route(
            "/v1/repair-tasks/{id}/manual",
            get(repair_task_handler::task_manual),
        )
        .route(
            "/v1/repair-history",
            get(repair_task_handler::list_completed_tasks),
        )
        .route("/v1/devices", get(repair_task_handler::list_devices))
        .route(
            "/v1/spare-parts",
            get(spare_part_handler::list_parts).post(spare_part_handler::create_part),
        )
        .route(
            "/v1/spare-parts/{id}",
            get(spare_part_handler::get_part)
                .put(spare_part_handler::update_part)
                .delete(spare_part_handler::delete_part),
        )
        .route(
            "/v1/assignment-rules",
            get(assignment_rule_handler::list_rules).post(assignment_rule_handler::create_rule),
        )
        .route(
            "/v1/assignment-rules/{id}",
            put(assignment_rule_handler::update_rule).delete(assignment_rule_handler::delete_rule),
        )
        .route(
            "/v1/repair-manuals",
            get(repair_manual_handler::list_manuals).post(repair_manual_handler::create_manual),
        )
        .route(
            "/v1/repair-manuals/{id}",
            delete(repair_manual_handler::delete_manual),
        )
        .route("/v1/dashboard", get(dashboard_handler::summary));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(Extension(ctx.spare_parts))
        .layer(Extension(ctx.assignment_rules))
        .layer(Extension(ctx.repair_manuals))
        .layer(Extension(ctx.repair_tasks))
        .layer(Extension(ctx.dashboard))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::{HeaderName, HeaderValue};
use axum_test::{TestRequest, TestServer};
use migration::{Migrator, MigratorTrait};
use repairdesk::config::settings::{DatabaseSettings, Settings};
use repairdesk::domain::models::caller::CallerRole;
use repairdesk::infrastructure::database::connection;
use repairdesk::presentation::routes::{self, AppContext};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

/// 内存 SQLite 只在同一个连接内可见，连接池固定为 1
pub async fn setup_db() -> Arc<DatabaseConnection> {
    let settings = DatabaseSettings {
        url: "sqlite::memory:".to_string(),
        max_connections: Some(1),
        min_connections: Some(1),
        connect_timeout: Some(5),
        idle_timeout: None,
        run_migrations: true,
    };

    let db = connection::create_pool(&settings)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    Arc::new(db)
}

/// 不读配置文件和环境变量的测试配置
pub fn test_settings() -> Settings {
    Settings::defaults()
        .unwrap()
        .set_override("metrics.enabled", false)
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap()
}

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub db: Arc<DatabaseConnection>,
}

pub async fn create_test_app() -> TestApp {
    create_test_app_with_settings(test_settings()).await
}

pub async fn create_test_app_with_settings(settings: Settings) -> TestApp {
    let db = setup_db().await;
    let app = routes::app(AppContext::new(db.clone(), &settings));
    let server = TestServer::new(app).expect("Failed to create test server");

    TestApp { server, db }
}

/// 附加认证代理注入的 `X-User-Id` / `X-User-Role` 头
pub fn as_user(request: TestRequest, user_id: Uuid, role: CallerRole) -> TestRequest {
    request
        .add_header(
            HeaderName::from_static("x-user-id"),
            HeaderValue::from_str(&user_id.to_string()).unwrap(),
        )
        .add_header(
            HeaderName::from_static("x-user-role"),
            HeaderValue::from_str(&role.to_string()).unwrap(),
        )
}

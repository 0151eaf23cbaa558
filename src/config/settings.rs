// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::repair_task_service::DefaultPartsCatalog;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 服务器配置
    pub server: ServerSettings,
    /// 指标导出配置
    pub metrics: MetricsSettings,
    /// 自动分配配置
    pub assignment: AssignmentSettings,
    /// 库存配置
    pub inventory: InventorySettings,
    /// 新建任务时按设备套用的默认备件
    #[serde(default)]
    pub default_parts: Vec<DefaultPartsSettings>,
}

/// 数据库配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
    /// 启动时执行数据库迁移
    pub run_migrations: bool,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    pub enabled: bool,
    /// Prometheus 抓取地址
    pub listen_addr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentSettings {
    /// 技术员同时持有的未完成任务上限
    pub workload_cap: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InventorySettings {
    /// 数量不高于该值的备件在仪表盘上标记为低库存
    pub low_stock_threshold: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DefaultPartsSettings {
    pub device_name: String,
    pub part_numbers: Vec<String>,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加：内置默认值、`config/default`、`config/{APP_ENVIRONMENT}`、
    /// `REPAIRDESK__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("REPAIRDESK").separator("__"));

        builder.build()?.try_deserialize()
    }

    /// 内置默认值，不读取文件和环境变量
    pub fn defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("database.url", "postgres://localhost/repairdesk")?
            .set_default("database.max_connections", 20)?
            .set_default("database.min_connections", 2)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            .set_default("database.run_migrations", true)?
            .set_default("metrics.enabled", true)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")?
            .set_default("assignment.workload_cap", 3)?
            .set_default("inventory.low_stock_threshold", 5)
    }

    /// 设备名称到默认零件号列表的映射
    pub fn default_parts_catalog(&self) -> DefaultPartsCatalog {
        let mut catalog = DefaultPartsCatalog::new();
        for entry in &self.default_parts {
            catalog
                .entry(entry.device_name.clone())
                .or_default()
                .extend(entry.part_numbers.iter().cloned());
        }
        catalog
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;

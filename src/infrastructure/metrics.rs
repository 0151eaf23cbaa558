// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::MetricsSettings;
use metrics::{describe_counter, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

/// 库存调整次数，按结果（applied / failed）区分
pub const STOCK_ADJUSTMENTS_TOTAL: &str = "stock_adjustments_total";
/// 自动分配次数，按结果区分
pub const AUTO_ASSIGNMENTS_TOTAL: &str = "auto_assignments_total";

/// 安装 Prometheus 导出器
///
/// 地址无效或端口被占用时只记录警告，服务照常启动
pub fn init_metrics(settings: &MetricsSettings) {
    if !settings.enabled {
        info!("Metrics exporter disabled");
        return;
    }

    let addr: SocketAddr = match settings.listen_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!(
                "Invalid metrics listen address {}: {}",
                settings.listen_addr, e
            );
            return;
        }
    };

    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}. This might happen if the port is already in use.", e);
        return;
    }

    describe_counter!(
        STOCK_ADJUSTMENTS_TOTAL,
        Unit::Count,
        "Stock adjustments applied to inventory, by outcome"
    );
    describe_counter!(
        AUTO_ASSIGNMENTS_TOTAL,
        Unit::Count,
        "Auto-assignment attempts, by outcome"
    );

    info!("Metrics exporter listening on {}", addr);
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::MetricsSettings;
use metrics::{describe_counter, describe_histogram, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

/// 初始化指标系统
///
/// 安装 Prometheus 导出器并注册预测流水线的各类指标。
/// 监听地址无效或端口被占用时只记录警告，服务照常启动。
pub fn init_metrics(settings: &MetricsSettings) {
    if !settings.enabled {
        info!("Metrics exporter disabled");
        return;
    }

    let addr: SocketAddr = match settings.listen_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!("Invalid metrics address {}: {}", settings.listen_addr, e);
            return;
        }
    };

    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}", e);
        return;
    }

    describe_metrics();
    info!("Metrics exporter listening on {}", addr);
}

fn describe_metrics() {
    describe_counter!(
        "capacity_forecasts_total",
        "Total number of demand forecasts written"
    );
    describe_counter!(
        "capacity_alerts_total",
        "Total number of capacity alerts raised, by level"
    );
    describe_counter!(
        "capacity_recommendations_total",
        "Total number of distribution recommendations created, by type"
    );
    describe_counter!(
        "capacity_forecast_runs_failed_total",
        "Total number of forecast runs that failed or timed out"
    );
    describe_histogram!(
        "capacity_forecast_run_duration_seconds",
        Unit::Seconds,
        "Duration of successful forecast runs"
    );
}

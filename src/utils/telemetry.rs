// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 初始化日志
///
/// 过滤规则取自 `RUST_LOG`，默认 `info,capacityrs=debug`；
/// `CAPACITYRS_LOG_FORMAT=json` 时输出 JSON 行
pub fn init_telemetry() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,capacityrs=debug".into());
    let json = std::env::var("CAPACITYRS_LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

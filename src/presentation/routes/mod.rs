// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::alert_repository::AlertRepository;
use crate::domain::repositories::recommendation_repository::RecommendationRepository;
use crate::domain::services::forecasting_service::ForecastingService;
use crate::presentation::handlers::{alert_handler, forecast_handler, recommendation_handler};
use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// # 返回值
///
/// 返回未注入依赖的路由
pub fn routes() -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let board_routes = Router::new()
        .route(
            "/v1/boards/{board_id}/forecasts",
            post(forecast_handler::generate_forecast),
        )
        .route(
            "/v1/boards/{board_id}/forecasts/summary",
            get(forecast_handler::forecast_summary),
        )
        .route(
            "/v1/boards/{board_id}/forecasts/chart",
            get(forecast_handler::capacity_chart),
        )
        .route(
            "/v1/boards/{board_id}/recommendations",
            post(recommendation_handler::generate_recommendations)
                .get(recommendation_handler::list_recommendations),
        )
        .route(
            "/v1/boards/{board_id}/alerts",
            get(alert_handler::list_alerts),
        )
        .route(
            "/v1/boards/{board_id}/work-items/{item_id}/suggested-assignee",
            get(forecast_handler::suggest_assignee),
        );

    let lifecycle_routes = Router::new()
        .route(
            "/v1/alerts/{alert_id}/acknowledge",
            post(alert_handler::acknowledge_alert),
        )
        .route(
            "/v1/alerts/{alert_id}/resolve",
            post(alert_handler::resolve_alert),
        )
        .route(
            "/v1/recommendations/{id}/accept",
            post(recommendation_handler::accept_recommendation),
        )
        .route(
            "/v1/recommendations/{id}/reject",
            post(recommendation_handler::reject_recommendation),
        )
        .route(
            "/v1/recommendations/{id}/implement",
            post(recommendation_handler::implement_recommendation),
        );

    Router::new()
        .merge(public_routes)
        .merge(board_routes)
        .merge(lifecycle_routes)
}

/// 创建完整应用
///
/// 注入预测服务和两个记录仓库，并加上请求追踪层
pub fn app(
    service: Arc<ForecastingService>,
    alert_repo: Arc<dyn AlertRepository>,
    recommendation_repo: Arc<dyn RecommendationRepository>,
) -> Router {
    routes()
        .layer(Extension(service))
        .layer(Extension(alert_repo))
        .layer(Extension(recommendation_repo))
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

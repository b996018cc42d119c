// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::forecast_request::{
    CapacityChartQueryDto, ForecastSummaryQueryDto, GenerateForecastRequestDto,
};
use crate::domain::services::forecasting_service::{
    AssigneeSuggestion, ForecastRun, ForecastingService,
};
use crate::domain::services::summary_reporter::{CapacityChart, ForecastSummary};
use crate::presentation::errors::AppError;
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// 生成容量预测
pub async fn generate_forecast(
    Extension(service): Extension<Arc<ForecastingService>>,
    Path(board_id): Path<Uuid>,
    payload: Option<Json<GenerateForecastRequestDto>>,
) -> Result<(StatusCode, Json<ForecastRun>), AppError> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    payload.validate()?;

    let run = service
        .generate_forecast(board_id, payload.days_ahead)
        .await?;
    Ok((StatusCode::CREATED, Json(run)))
}

/// 预测汇总；没有预测时返回 null
pub async fn forecast_summary(
    Extension(service): Extension<Arc<ForecastingService>>,
    Path(board_id): Path<Uuid>,
    Query(query): Query<ForecastSummaryQueryDto>,
) -> Result<Json<Option<ForecastSummary>>, AppError> {
    query.validate()?;
    let summary = service.get_forecast_summary(board_id, query.days).await?;
    Ok(Json(summary))
}

/// 容量图表数据
pub async fn capacity_chart(
    Extension(service): Extension<Arc<ForecastingService>>,
    Path(board_id): Path<Uuid>,
    Query(query): Query<CapacityChartQueryDto>,
) -> Result<Json<CapacityChart>, AppError> {
    query.validate()?;
    let chart = service.capacity_chart(board_id, query.limit).await?;
    Ok(Json(chart))
}

/// 为工作项推荐负责人
pub async fn suggest_assignee(
    Extension(service): Extension<Arc<ForecastingService>>,
    Path((board_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<AssigneeSuggestion>, AppError> {
    let suggestion = service.suggest_assignee(board_id, item_id).await?;
    Ok(Json(suggestion))
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::forecast_request::AlertListQueryDto;
use crate::application::dto::lifecycle_request::AlertActionDto;
use crate::application::use_cases::lifecycle_use_case::AlertLifecycleUseCase;
use crate::domain::models::alert::CapacityAlert;
use crate::domain::repositories::alert_repository::AlertRepository;
use crate::domain::services::forecasting_service::ForecastingService;
use crate::presentation::errors::AppError;
use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use std::sync::Arc;
use uuid::Uuid;

pub async fn list_alerts(
    Extension(service): Extension<Arc<ForecastingService>>,
    Path(board_id): Path<Uuid>,
    Query(query): Query<AlertListQueryDto>,
) -> Result<Json<Vec<CapacityAlert>>, AppError> {
    let alerts = service.list_alerts(board_id, query.status).await?;
    Ok(Json(alerts))
}

pub async fn acknowledge_alert(
    Extension(repo): Extension<Arc<dyn AlertRepository>>,
    Path(alert_id): Path<Uuid>,
    Json(payload): Json<AlertActionDto>,
) -> Result<Json<CapacityAlert>, AppError> {
    let use_case = AlertLifecycleUseCase::new(repo);
    let alert = use_case.acknowledge(alert_id, payload.actor).await?;
    Ok(Json(alert))
}

pub async fn resolve_alert(
    Extension(repo): Extension<Arc<dyn AlertRepository>>,
    Path(alert_id): Path<Uuid>,
    Json(payload): Json<AlertActionDto>,
) -> Result<Json<CapacityAlert>, AppError> {
    let use_case = AlertLifecycleUseCase::new(repo);
    let alert = use_case.resolve(alert_id, payload.actor).await?;
    Ok(Json(alert))
}

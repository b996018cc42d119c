// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::forecast_request::{
    GenerateRecommendationsRequestDto, RecommendationListQueryDto,
};
use crate::application::dto::lifecycle_request::ImplementRecommendationDto;
use crate::application::use_cases::lifecycle_use_case::RecommendationLifecycleUseCase;
use crate::domain::models::recommendation::DistributionRecommendation;
use crate::domain::repositories::recommendation_repository::RecommendationRepository;
use crate::domain::services::forecasting_service::ForecastingService;
use crate::presentation::errors::AppError;
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// 生成负载分配建议
pub async fn generate_recommendations(
    Extension(service): Extension<Arc<ForecastingService>>,
    Path(board_id): Path<Uuid>,
    payload: Option<Json<GenerateRecommendationsRequestDto>>,
) -> Result<(StatusCode, Json<Vec<DistributionRecommendation>>), AppError> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    payload.validate()?;

    let recommendations = service
        .generate_recommendations(board_id, payload.period_days)
        .await?;
    Ok((StatusCode::CREATED, Json(recommendations)))
}

pub async fn list_recommendations(
    Extension(service): Extension<Arc<ForecastingService>>,
    Path(board_id): Path<Uuid>,
    Query(query): Query<RecommendationListQueryDto>,
) -> Result<Json<Vec<DistributionRecommendation>>, AppError> {
    let recommendations = service.list_recommendations(board_id, query.status).await?;
    Ok(Json(recommendations))
}

pub async fn accept_recommendation(
    Extension(repo): Extension<Arc<dyn RecommendationRepository>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DistributionRecommendation>, AppError> {
    let recommendation = RecommendationLifecycleUseCase::new(repo).accept(id).await?;
    Ok(Json(recommendation))
}

pub async fn reject_recommendation(
    Extension(repo): Extension<Arc<dyn RecommendationRepository>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DistributionRecommendation>, AppError> {
    let recommendation = RecommendationLifecycleUseCase::new(repo).reject(id).await?;
    Ok(Json(recommendation))
}

pub async fn implement_recommendation(
    Extension(repo): Extension<Arc<dyn RecommendationRepository>>,
    Path(id): Path<Uuid>,
    payload: Option<Json<ImplementRecommendationDto>>,
) -> Result<Json<DistributionRecommendation>, AppError> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    payload.validate()?;

    let recommendation = RecommendationLifecycleUseCase::new(repo)
        .implement(id, payload.note)
        .await?;
    Ok(Json(recommendation))
}

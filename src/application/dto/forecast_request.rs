// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::alert::AlertStatus;
use crate::domain::models::recommendation::RecommendationStatus;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 生成预测请求
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct GenerateForecastRequestDto {
    /// 预测天数，默认 21
    #[validate(range(min = 7, max = 30))]
    pub days_ahead: Option<i64>,
}

/// 生成建议请求
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct GenerateRecommendationsRequestDto {
    #[validate(range(min = 7, max = 30))]
    pub period_days: Option<i64>,
}

/// 预测汇总查询参数
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct ForecastSummaryQueryDto {
    #[validate(range(min = 1, max = 365))]
    pub days: Option<i64>,
}

/// 容量图表查询参数
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct CapacityChartQueryDto {
    #[validate(range(min = 1, max = 500))]
    pub limit: Option<u64>,
}

/// 告警列表查询参数
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AlertListQueryDto {
    pub status: Option<AlertStatus>,
}

/// 建议列表查询参数
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RecommendationListQueryDto {
    pub status: Option<RecommendationStatus>,
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::forecast::{DemandForecast, ResourceTarget};
use crate::domain::repositories::board_repository::RepositoryError;
use crate::domain::repositories::forecast_repository::{ForecastQuery, ForecastRepository};
use crate::infrastructure::database::entities::demand_forecast as forecast_entity;
use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;

const TARGET_PERSON: &str = "person";
const TARGET_ROLE: &str = "role";

/// 需求预测仓库实现
pub struct ForecastRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl ForecastRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub(crate) fn to_active_model(forecast: &DemandForecast) -> forecast_entity::ActiveModel {
        let (target_kind, target_person, target_role) = match &forecast.target {
            ResourceTarget::Person(id) => (TARGET_PERSON, Some(*id), None),
            ResourceTarget::Role(role) => (TARGET_ROLE, None, Some(role.clone())),
        };

        forecast_entity::ActiveModel {
            id: Set(forecast.id),
            run_id: Set(forecast.run_id),
            run_position: Set(forecast.run_position),
            board_id: Set(forecast.board_id),
            target_kind: Set(target_kind.to_string()),
            target_person: Set(target_person),
            target_role: Set(target_role),
            role_label: Set(forecast.role_label.clone()),
            period_start: Set(forecast.period_start),
            period_end: Set(forecast.period_end),
            predicted_workload_hours: Set(forecast.predicted_workload_hours),
            available_capacity_hours: Set(forecast.available_capacity_hours),
            confidence_score: Set(forecast.confidence_score),
            created_at: Set(forecast.created_at.into()),
        }
    }

    fn to_domain(m: forecast_entity::Model) -> Result<DemandForecast, RepositoryError> {
        let target = match (m.target_kind.as_str(), m.target_person, m.target_role) {
            (TARGET_PERSON, Some(id), _) => ResourceTarget::Person(id),
            (TARGET_ROLE, _, Some(role)) => ResourceTarget::Role(role),
            (kind, _, _) => {
                return Err(RepositoryError::Database(DbErr::Custom(format!(
                    "Invalid forecast target: {}",
                    kind
                ))))
            }
        };

        Ok(DemandForecast {
            id: m.id,
            run_id: m.run_id,
            run_position: m.run_position,
            board_id: m.board_id,
            target,
            role_label: m.role_label,
            period_start: m.period_start,
            period_end: m.period_end,
            predicted_workload_hours: m.predicted_workload_hours,
            available_capacity_hours: m.available_capacity_hours,
            confidence_score: m.confidence_score,
            created_at: m.created_at.into(),
        })
    }
}

#[async_trait]
impl ForecastRepository for ForecastRepositoryImpl {
    async fn create_many(&self, forecasts: &[DemandForecast]) -> Result<(), RepositoryError> {
        if forecasts.is_empty() {
            return Ok(());
        }

        let models = forecasts.iter().map(Self::to_active_model);
        forecast_entity::Entity::insert_many(models)
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }

    async fn query(&self, query: ForecastQuery) -> Result<Vec<DemandForecast>, RepositoryError> {
        let mut select = forecast_entity::Entity::find()
            .filter(forecast_entity::Column::BoardId.eq(query.board_id));

        if let Some(start) = query.period_start {
            select = select.filter(forecast_entity::Column::PeriodStart.eq(start));
        }
        if let Some(end) = query.period_end {
            select = select.filter(forecast_entity::Column::PeriodEnd.eq(end));
        }
        if let Some(end_max) = query.period_end_max {
            select = select.filter(forecast_entity::Column::PeriodEnd.lte(end_max));
        }

        let models = select
            .order_by_desc(forecast_entity::Column::CreatedAt)
            .order_by_asc(forecast_entity::Column::RunPosition)
            .limit(query.limit)
            .all(self.db.as_ref())
            .await?;

        models.into_iter().map(Self::to_domain).collect()
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::alert::{AlertStatus, CapacityAlert};
use crate::domain::models::forecast::DemandForecast;
use crate::domain::repositories::board_repository::RepositoryError;
use crate::domain::repositories::run_repository::{AlertWrite, RunRecorder};
use crate::infrastructure::database::entities::demand_forecast as forecast_entity;
use crate::infrastructure::repositories::alert_repo_impl::{to_active_model, update_where_status};
use crate::infrastructure::repositories::forecast_repo_impl::ForecastRepositoryImpl;
use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;
use tracing::debug;

/// 基于数据库事务的运行记录器
///
/// 预测和告警在同一事务中写入；任一写入失败或调用方被取消时事务回滚
pub struct RunRecorderImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl RunRecorderImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RunRecorder for RunRecorderImpl {
    async fn record_run(
        &self,
        forecasts: &[DemandForecast],
        alerts: &[AlertWrite],
    ) -> Result<Vec<CapacityAlert>, RepositoryError> {
        let txn = self.db.begin().await?;

        if !forecasts.is_empty() {
            forecast_entity::Entity::insert_many(
                forecasts.iter().map(ForecastRepositoryImpl::to_active_model),
            )
            .exec(&txn)
            .await?;
        }

        let mut persisted = Vec::with_capacity(alerts.len());
        for write in alerts {
            if let AlertWrite::Refresh { refreshed, .. } = write {
                if update_where_status(&txn, refreshed, AlertStatus::Active).await? {
                    persisted.push(refreshed.clone());
                    continue;
                }
                debug!("Alert {} is no longer active, raising a new one", refreshed.id);
            }

            let alert = write.fallback();
            to_active_model(alert).insert(&txn).await?;
            persisted.push(alert.clone());
        }

        txn.commit().await?;
        Ok(persisted)
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::alert::{AlertStatus, CapacityAlert};
use crate::domain::models::forecast::DemandForecast;
use crate::domain::models::recommendation::{DistributionRecommendation, RecommendationStatus};
use crate::domain::repositories::alert_repository::{ActiveAlertKey, AlertRepository};
use crate::domain::repositories::board_repository::RepositoryError;
use crate::domain::repositories::forecast_repository::{ForecastQuery, ForecastRepository};
use crate::domain::repositories::recommendation_repository::RecommendationRepository;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// 内存中的预测仓库
///
/// 只追加写入；每次 `create_many` 的批次序号用于在创建时间相同时区分先后
#[derive(Default, Clone)]
pub struct InMemoryForecastRepository {
    forecasts: Arc<RwLock<Vec<(u64, DemandForecast)>>>,
}

impl InMemoryForecastRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已写入的预测总数
    pub async fn len(&self) -> usize {
        self.forecasts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.forecasts.read().await.is_empty()
    }
}

#[async_trait]
impl ForecastRepository for InMemoryForecastRepository {
    async fn create_many(&self, forecasts: &[DemandForecast]) -> Result<(), RepositoryError> {
        let mut stored = self.forecasts.write().await;
        let batch = stored.last().map(|(seq, _)| seq + 1).unwrap_or(0);
        stored.extend(forecasts.iter().cloned().map(|f| (batch, f)));
        Ok(())
    }

    async fn query(&self, query: ForecastQuery) -> Result<Vec<DemandForecast>, RepositoryError> {
        let stored = self.forecasts.read().await;
        let mut matched: Vec<&(u64, DemandForecast)> =
            stored.iter().filter(|(_, f)| query.matches(f)).collect();
        matched.sort_by(|(seq_a, a), (seq_b, b)| {
            b.created_at
                .cmp(&a.created_at)
                .then(seq_b.cmp(seq_a))
                .then(a.run_position.cmp(&b.run_position))
        });

        let limit = query.limit.map(|l| l as usize).unwrap_or(usize::MAX);
        Ok(matched
            .into_iter()
            .take(limit)
            .map(|(_, f)| f.clone())
            .collect())
    }
}

/// 内存中的告警仓库
#[derive(Default, Clone)]
pub struct InMemoryAlertRepository {
    alerts: Arc<RwLock<HashMap<Uuid, CapacityAlert>>>,
}

impl InMemoryAlertRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AlertRepository for InMemoryAlertRepository {
    async fn create(&self, alert: &CapacityAlert) -> Result<CapacityAlert, RepositoryError> {
        self.alerts.write().await.insert(alert.id, alert.clone());
        Ok(alert.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CapacityAlert>, RepositoryError> {
        Ok(self.alerts.read().await.get(&id).cloned())
    }

    async fn update_if_status(
        &self,
        alert: &CapacityAlert,
        expected: AlertStatus,
    ) -> Result<CapacityAlert, RepositoryError> {
        let mut alerts = self.alerts.write().await;
        match alerts.get_mut(&alert.id) {
            Some(existing) if existing.status == expected => {
                *existing = alert.clone();
                Ok(alert.clone())
            }
            Some(_) => Err(RepositoryError::Conflict),
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn find_active(
        &self,
        key: &ActiveAlertKey,
    ) -> Result<Option<CapacityAlert>, RepositoryError> {
        let alerts = self.alerts.read().await;
        Ok(alerts
            .values()
            .filter(|a| key.matches(a))
            .max_by_key(|a| a.created_at)
            .cloned())
    }

    async fn list_by_board(
        &self,
        board_id: Uuid,
        statuses: &[AlertStatus],
    ) -> Result<Vec<CapacityAlert>, RepositoryError> {
        let alerts = self.alerts.read().await;
        let mut listed: Vec<CapacityAlert> = alerts
            .values()
            .filter(|a| a.board_id == board_id)
            .filter(|a| statuses.is_empty() || statuses.contains(&a.status))
            .cloned()
            .collect();
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listed)
    }
}

/// 内存中的建议仓库
#[derive(Default, Clone)]
pub struct InMemoryRecommendationRepository {
    recommendations: Arc<RwLock<HashMap<Uuid, DistributionRecommendation>>>,
}

impl InMemoryRecommendationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecommendationRepository for InMemoryRecommendationRepository {
    async fn create(
        &self,
        recommendation: &DistributionRecommendation,
    ) -> Result<DistributionRecommendation, RepositoryError> {
        self.recommendations
            .write()
            .await
            .insert(recommendation.id, recommendation.clone());
        Ok(recommendation.clone())
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<DistributionRecommendation>, RepositoryError> {
        Ok(self.recommendations.read().await.get(&id).cloned())
    }

    async fn update_if_status(
        &self,
        recommendation: &DistributionRecommendation,
        expected: RecommendationStatus,
    ) -> Result<DistributionRecommendation, RepositoryError> {
        let mut recommendations = self.recommendations.write().await;
        match recommendations.get_mut(&recommendation.id) {
            Some(existing) if existing.status == expected => {
                *existing = recommendation.clone();
                Ok(recommendation.clone())
            }
            Some(_) => Err(RepositoryError::Conflict),
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn list_by_board(
        &self,
        board_id: Uuid,
        status: Option<RecommendationStatus>,
    ) -> Result<Vec<DistributionRecommendation>, RepositoryError> {
        let recommendations = self.recommendations.read().await;
        let mut listed: Vec<DistributionRecommendation> = recommendations
            .values()
            .filter(|r| r.board_id == board_id)
            .filter(|r| status.is_none_or(|s| r.status == s))
            .cloned()
            .collect();
        listed.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(listed)
    }
}

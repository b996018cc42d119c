// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::alert::CapacityAlert;
use crate::domain::models::recommendation::DistributionRecommendation;
use crate::domain::models::work_item::DomainError;
use crate::domain::repositories::alert_repository::AlertRepository;
use crate::domain::repositories::board_repository::RepositoryError;
use crate::domain::repositories::recommendation_repository::RecommendationRepository;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// 告警生命周期用例：确认、解决
pub struct AlertLifecycleUseCase<R: ?Sized> {
    repo: Arc<R>,
}

impl<R> AlertLifecycleUseCase<R>
where
    R: AlertRepository + ?Sized,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    async fn load(&self, id: Uuid) -> Result<CapacityAlert, LifecycleError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(LifecycleError::NotFound("Alert"))
    }

    /// 确认告警；写入时告警状态已被其他请求改变则返回冲突
    pub async fn acknowledge(&self, id: Uuid, actor: Uuid) -> Result<CapacityAlert, LifecycleError> {
        let current = self.load(id).await?;
        let expected = current.status;
        let alert = current.acknowledge(actor)?;
        let alert = self.repo.update_if_status(&alert, expected).await?;
        info!("Alert {} acknowledged by {}", id, actor);
        Ok(alert)
    }

    pub async fn resolve(&self, id: Uuid, actor: Uuid) -> Result<CapacityAlert, LifecycleError> {
        let current = self.load(id).await?;
        let expected = current.status;
        let alert = current.resolve(actor)?;
        let alert = self.repo.update_if_status(&alert, expected).await?;
        info!("Alert {} resolved by {}", id, actor);
        Ok(alert)
    }
}

/// 建议生命周期用例：接受、拒绝、实施
///
/// 只记录状态；实际移动或重新分配任务由外部任务系统完成
pub struct RecommendationLifecycleUseCase<R: ?Sized> {
    repo: Arc<R>,
}

impl<R> RecommendationLifecycleUseCase<R>
where
    R: RecommendationRepository + ?Sized,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    async fn load(&self, id: Uuid) -> Result<DistributionRecommendation, LifecycleError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(LifecycleError::NotFound("Recommendation"))
    }

    pub async fn accept(&self, id: Uuid) -> Result<DistributionRecommendation, LifecycleError> {
        let current = self.load(id).await?;
        let expected = current.status;
        let recommendation = current.accept()?;
        Ok(self.repo.update_if_status(&recommendation, expected).await?)
    }

    pub async fn reject(&self, id: Uuid) -> Result<DistributionRecommendation, LifecycleError> {
        let current = self.load(id).await?;
        let expected = current.status;
        let recommendation = current.reject()?;
        Ok(self.repo.update_if_status(&recommendation, expected).await?)
    }

    pub async fn implement(
        &self,
        id: Uuid,
        note: Option<String>,
    ) -> Result<DistributionRecommendation, LifecycleError> {
        let current = self.load(id).await?;
        let expected = current.status;
        let recommendation = current.implement(note)?;
        let recommendation = self
            .repo
            .update_if_status(&recommendation, expected)
            .await?;
        info!("Recommendation {} implemented", id);
        Ok(recommendation)
    }
}

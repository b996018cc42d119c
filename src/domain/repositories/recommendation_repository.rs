// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::recommendation::{DistributionRecommendation, RecommendationStatus};
use crate::domain::repositories::board_repository::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 负载分配建议仓库特质
#[async_trait]
pub trait RecommendationRepository: Send + Sync {
    /// 创建建议
    async fn create(
        &self,
        recommendation: &DistributionRecommendation,
    ) -> Result<DistributionRecommendation, RepositoryError>;
    /// 根据ID查找建议
    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<DistributionRecommendation>, RepositoryError>;
    /// 更新建议
    ///
    /// 仅当存储中的状态仍为 `expected` 时写入，否则返回 `RepositoryError::Conflict`
    async fn update_if_status(
        &self,
        recommendation: &DistributionRecommendation,
        expected: RecommendationStatus,
    ) -> Result<DistributionRecommendation, RepositoryError>;
    /// 列出看板的建议，按排序等级正序、创建时间倒序
    async fn list_by_board(
        &self,
        board_id: Uuid,
        status: Option<RecommendationStatus>,
    ) -> Result<Vec<DistributionRecommendation>, RepositoryError>;
}

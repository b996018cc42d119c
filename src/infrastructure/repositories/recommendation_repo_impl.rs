// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::recommendation::{
    DistributionRecommendation, RecommendationStatus, RecommendationType,
};
use crate::domain::repositories::board_repository::RepositoryError;
use crate::domain::repositories::recommendation_repository::RecommendationRepository;
use crate::infrastructure::database::entities::distribution_recommendation as recommendation_entity;
use async_trait::async_trait;
use sea_orm::*;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

/// 负载分配建议仓库实现
pub struct RecommendationRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl RecommendationRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl TryFrom<recommendation_entity::Model> for DistributionRecommendation {
    type Error = RepositoryError;

    fn try_from(m: recommendation_entity::Model) -> Result<Self, Self::Error> {
        let recommendation_type = RecommendationType::from_str(&m.recommendation_type)
            .map_err(|_| {
                RepositoryError::Database(DbErr::Custom(format!(
                    "Invalid recommendation type: {}",
                    m.recommendation_type
                )))
            })?;
        let status = RecommendationStatus::from_str(&m.status).map_err(|_| {
            RepositoryError::Database(DbErr::Custom(format!(
                "Invalid recommendation status: {}",
                m.status
            )))
        })?;

        Ok(DistributionRecommendation {
            id: m.id,
            board_id: m.board_id,
            forecast_id: m.forecast_id,
            recommendation_type,
            priority: m.priority,
            title: m.title,
            description: m.description,
            expected_capacity_savings_hours: m.expected_capacity_savings_hours,
            confidence_score: m.confidence_score,
            status,
            affected_tasks: serde_json::from_value(m.affected_tasks)?,
            affected_users: serde_json::from_value(m.affected_users)?,
            implementation_note: m.implementation_note,
            created_at: m.created_at.into(),
            updated_at: m.updated_at.into(),
            implemented_at: m.implemented_at.map(Into::into),
        })
    }
}

#[async_trait]
impl RecommendationRepository for RecommendationRepositoryImpl {
    async fn create(
        &self,
        recommendation: &DistributionRecommendation,
    ) -> Result<DistributionRecommendation, RepositoryError> {
        let model = recommendation_entity::ActiveModel {
            id: Set(recommendation.id),
            board_id: Set(recommendation.board_id),
            forecast_id: Set(recommendation.forecast_id),
            recommendation_type: Set(recommendation.recommendation_type.to_string()),
            priority: Set(recommendation.priority),
            title: Set(recommendation.title.clone()),
            description: Set(recommendation.description.clone()),
            expected_capacity_savings_hours: Set(recommendation.expected_capacity_savings_hours),
            confidence_score: Set(recommendation.confidence_score),
            status: Set(recommendation.status.to_string()),
            affected_tasks: Set(serde_json::to_value(&recommendation.affected_tasks)?),
            affected_users: Set(serde_json::to_value(&recommendation.affected_users)?),
            implementation_note: Set(recommendation.implementation_note.clone()),
            created_at: Set(recommendation.created_at.into()),
            updated_at: Set(recommendation.updated_at.into()),
            implemented_at: Set(recommendation.implemented_at.map(Into::into)),
        };

        model.insert(self.db.as_ref()).await?;
        Ok(recommendation.clone())
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<DistributionRecommendation>, RepositoryError> {
        recommendation_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .map(DistributionRecommendation::try_from)
            .transpose()
    }

    async fn update_if_status(
        &self,
        recommendation: &DistributionRecommendation,
        expected: RecommendationStatus,
    ) -> Result<DistributionRecommendation, RepositoryError> {
        let changes = recommendation_entity::ActiveModel {
            status: Set(recommendation.status.to_string()),
            implementation_note: Set(recommendation.implementation_note.clone()),
            updated_at: Set(recommendation.updated_at.into()),
            implemented_at: Set(recommendation.implemented_at.map(Into::into)),
            ..Default::default()
        };

        let result = recommendation_entity::Entity::update_many()
            .set(changes)
            .filter(recommendation_entity::Column::Id.eq(recommendation.id))
            .filter(recommendation_entity::Column::Status.eq(expected.to_string()))
            .exec(self.db.as_ref())
            .await?;
        if result.rows_affected > 0 {
            return Ok(recommendation.clone());
        }

        match self.find_by_id(recommendation.id).await? {
            Some(_) => Err(RepositoryError::Conflict),
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn list_by_board(
        &self,
        board_id: Uuid,
        status: Option<RecommendationStatus>,
    ) -> Result<Vec<DistributionRecommendation>, RepositoryError> {
        let mut select = recommendation_entity::Entity::find()
            .filter(recommendation_entity::Column::BoardId.eq(board_id));

        if let Some(status) = status {
            select = select.filter(recommendation_entity::Column::Status.eq(status.to_string()));
        }

        select
            .order_by_asc(recommendation_entity::Column::Priority)
            .order_by_desc(recommendation_entity::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(DistributionRecommendation::try_from)
            .collect()
    }
}

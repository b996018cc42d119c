// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::alert::{AlertStatus, CapacityAlert};
use crate::domain::repositories::alert_repository::{ActiveAlertKey, AlertRepository};
use crate::domain::repositories::board_repository::RepositoryError;
use crate::infrastructure::database::entities::capacity_alert as alert_entity;
use async_trait::async_trait;
use sea_orm::*;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

/// 容量告警仓库实现
pub struct AlertRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl AlertRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

pub(crate) fn to_active_model(alert: &CapacityAlert) -> alert_entity::ActiveModel {
    alert_entity::ActiveModel {
        id: Set(alert.id),
        board_id: Set(alert.board_id),
        forecast_id: Set(alert.forecast_id),
        alert_type: Set(alert.alert_type.to_string()),
        alert_level: Set(alert.alert_level.to_string()),
        status: Set(alert.status.to_string()),
        resource_id: Set(alert.resource_id),
        period_start: Set(alert.period_start),
        period_end: Set(alert.period_end),
        message: Set(alert.message.clone()),
        workload_percentage: Set(alert.workload_percentage),
        acknowledged_by: Set(alert.acknowledged_by),
        acknowledged_at: Set(alert.acknowledged_at.map(Into::into)),
        resolved_by: Set(alert.resolved_by),
        resolved_at: Set(alert.resolved_at.map(Into::into)),
        created_at: Set(alert.created_at.into()),
        updated_at: Set(alert.updated_at.into()),
    }
}

/// 条件更新：只有存储中的状态仍为 `expected` 时才写入可变字段
///
/// 返回是否有行被更新
pub(crate) async fn update_where_status<C: ConnectionTrait>(
    db: &C,
    alert: &CapacityAlert,
    expected: AlertStatus,
) -> Result<bool, DbErr> {
    let changes = alert_entity::ActiveModel {
        forecast_id: Set(alert.forecast_id),
        status: Set(alert.status.to_string()),
        message: Set(alert.message.clone()),
        workload_percentage: Set(alert.workload_percentage),
        acknowledged_by: Set(alert.acknowledged_by),
        acknowledged_at: Set(alert.acknowledged_at.map(Into::into)),
        resolved_by: Set(alert.resolved_by),
        resolved_at: Set(alert.resolved_at.map(Into::into)),
        updated_at: Set(alert.updated_at.into()),
        ..Default::default()
    };

    let result = alert_entity::Entity::update_many()
        .set(changes)
        .filter(alert_entity::Column::Id.eq(alert.id))
        .filter(alert_entity::Column::Status.eq(expected.to_string()))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}

fn parse<T: FromStr>(value: &str, field: &str) -> Result<T, RepositoryError> {
    T::from_str(value).map_err(|_| {
        RepositoryError::Database(DbErr::Custom(format!("Invalid {}: {}", field, value)))
    })
}

impl TryFrom<alert_entity::Model> for CapacityAlert {
    type Error = RepositoryError;

    fn try_from(m: alert_entity::Model) -> Result<Self, Self::Error> {
        Ok(CapacityAlert {
            id: m.id,
            board_id: m.board_id,
            forecast_id: m.forecast_id,
            alert_type: parse(&m.alert_type, "alert type")?,
            alert_level: parse(&m.alert_level, "alert level")?,
            status: parse(&m.status, "alert status")?,
            resource_id: m.resource_id,
            period_start: m.period_start,
            period_end: m.period_end,
            message: m.message,
            workload_percentage: m.workload_percentage,
            acknowledged_by: m.acknowledged_by,
            acknowledged_at: m.acknowledged_at.map(Into::into),
            resolved_by: m.resolved_by,
            resolved_at: m.resolved_at.map(Into::into),
            created_at: m.created_at.into(),
            updated_at: m.updated_at.into(),
        })
    }
}

#[async_trait]
impl AlertRepository for AlertRepositoryImpl {
    async fn create(&self, alert: &CapacityAlert) -> Result<CapacityAlert, RepositoryError> {
        to_active_model(alert).insert(self.db.as_ref()).await?;
        Ok(alert.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CapacityAlert>, RepositoryError> {
        alert_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .map(CapacityAlert::try_from)
            .transpose()
    }

    async fn update_if_status(
        &self,
        alert: &CapacityAlert,
        expected: AlertStatus,
    ) -> Result<CapacityAlert, RepositoryError> {
        if update_where_status(self.db.as_ref(), alert, expected).await? {
            return Ok(alert.clone());
        }

        match self.find_by_id(alert.id).await? {
            Some(_) => Err(RepositoryError::Conflict),
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn find_active(
        &self,
        key: &ActiveAlertKey,
    ) -> Result<Option<CapacityAlert>, RepositoryError> {
        let mut select = alert_entity::Entity::find()
            .filter(alert_entity::Column::BoardId.eq(key.board_id))
            .filter(alert_entity::Column::AlertType.eq(key.alert_type.to_string()))
            .filter(alert_entity::Column::AlertLevel.eq(key.alert_level.to_string()))
            .filter(alert_entity::Column::Status.eq(AlertStatus::Active.to_string()));

        select = match key.resource_id {
            Some(id) => select.filter(alert_entity::Column::ResourceId.eq(id)),
            None => select.filter(alert_entity::Column::ResourceId.is_null()),
        };
        select = match key.period_start {
            Some(start) => select.filter(alert_entity::Column::PeriodStart.eq(start)),
            None => select.filter(alert_entity::Column::PeriodStart.is_null()),
        };
        select = match key.period_end {
            Some(end) => select.filter(alert_entity::Column::PeriodEnd.eq(end)),
            None => select.filter(alert_entity::Column::PeriodEnd.is_null()),
        };

        select
            .order_by_desc(alert_entity::Column::CreatedAt)
            .one(self.db.as_ref())
            .await?
            .map(CapacityAlert::try_from)
            .transpose()
    }

    async fn list_by_board(
        &self,
        board_id: Uuid,
        statuses: &[AlertStatus],
    ) -> Result<Vec<CapacityAlert>, RepositoryError> {
        let mut select =
            alert_entity::Entity::find().filter(alert_entity::Column::BoardId.eq(board_id));

        if !statuses.is_empty() {
            select = select.filter(
                alert_entity::Column::Status.is_in(statuses.iter().map(|s| s.to_string())),
            );
        }

        select
            .order_by_desc(alert_entity::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(CapacityAlert::try_from)
            .collect()
    }
}

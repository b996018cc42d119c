// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::alert::{AlertLevel, AlertStatus, AlertType, CapacityAlert};
use crate::domain::repositories::board_repository::RepositoryError;
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

/// 活跃告警去重键
///
/// 同一看板、范围、成员、预测周期和级别最多保留一条活跃告警
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveAlertKey {
    pub board_id: Uuid,
    pub alert_type: AlertType,
    pub resource_id: Option<Uuid>,
    pub alert_level: AlertLevel,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
}

impl ActiveAlertKey {
    /// 取告警自身的去重键
    pub fn of(alert: &CapacityAlert) -> Self {
        Self {
            board_id: alert.board_id,
            alert_type: alert.alert_type,
            resource_id: alert.resource_id,
            alert_level: alert.alert_level,
            period_start: alert.period_start,
            period_end: alert.period_end,
        }
    }

    /// 判断告警是否活跃且键相同
    pub fn matches(&self, alert: &CapacityAlert) -> bool {
        alert.status == AlertStatus::Active && *self == Self::of(alert)
    }
}

/// 告警仓库特质
#[async_trait]
pub trait AlertRepository: Send + Sync {
    /// 创建告警
    async fn create(&self, alert: &CapacityAlert) -> Result<CapacityAlert, RepositoryError>;
    /// 根据ID查找告警
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CapacityAlert>, RepositoryError>;
    /// 更新告警
    ///
    /// 仅当存储中的状态仍为 `expected` 时写入；
    /// 状态已被其他请求改变时返回 `RepositoryError::Conflict`
    async fn update_if_status(
        &self,
        alert: &CapacityAlert,
        expected: AlertStatus,
    ) -> Result<CapacityAlert, RepositoryError>;
    /// 查找去重键相同且仍处于活跃状态的告警
    async fn find_active(
        &self,
        key: &ActiveAlertKey,
    ) -> Result<Option<CapacityAlert>, RepositoryError>;
    /// 列出看板的告警，按创建时间倒序；`statuses` 为空时返回全部
    async fn list_by_board(
        &self,
        board_id: Uuid,
        statuses: &[AlertStatus],
    ) -> Result<Vec<CapacityAlert>, RepositoryError>;
}

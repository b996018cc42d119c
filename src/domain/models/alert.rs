// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::work_item::DomainError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 容量告警
///
/// 利用率越过阈值时由告警引擎创建，初始状态总是 Active。
/// 状态转换由外部的确认/解决操作驱动：
/// Active → Acknowledged → Resolved，或 Active → Resolved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityAlert {
    /// 告警唯一标识符
    pub id: Uuid,
    /// 所属看板ID
    pub board_id: Uuid,
    /// 触发告警的预测ID（团队告警为空）
    pub forecast_id: Option<Uuid>,
    /// 告警范围
    pub alert_type: AlertType,
    /// 告警级别
    pub alert_level: AlertLevel,
    /// 告警状态
    pub status: AlertStatus,
    /// 相关成员（仅个人告警）
    pub resource_id: Option<Uuid>,
    /// 触发告警的预测周期开始日期
    pub period_start: Option<NaiveDate>,
    /// 触发告警的预测周期结束日期
    pub period_end: Option<NaiveDate>,
    /// 告警消息
    pub message: String,
    /// 触发时的利用率快照（取整）
    pub workload_percentage: i32,
    /// 确认人
    pub acknowledged_by: Option<Uuid>,
    /// 确认时间
    pub acknowledged_at: Option<DateTime<Utc>>,
    /// 解决人
    pub resolved_by: Option<Uuid>,
    /// 解决时间
    pub resolved_at: Option<DateTime<Utc>>,
    /// 创建时间
    pub created_at: DateTime<Utc>,
    /// 更新时间
    pub updated_at: DateTime<Utc>,
}

/// 告警范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    /// 个人
    Individual,
    /// 团队
    Team,
}

/// 告警级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    /// 警告：80% <= 利用率 < 100%
    Warning,
    /// 严重：利用率 >= 100%
    Critical,
}

/// 告警状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    /// 活跃
    #[default]
    Active,
    /// 已确认
    Acknowledged,
    /// 已解决
    Resolved,
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AlertType::Individual => write!(f, "individual"),
            AlertType::Team => write!(f, "team"),
        }
    }
}

impl FromStr for AlertType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "individual" => Ok(AlertType::Individual),
            "team" => Ok(AlertType::Team),
            _ => Err(()),
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AlertLevel::Warning => write!(f, "warning"),
            AlertLevel::Critical => write!(f, "critical"),
        }
    }
}

impl FromStr for AlertLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warning" => Ok(AlertLevel::Warning),
            "critical" => Ok(AlertLevel::Critical),
            _ => Err(()),
        }
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AlertStatus::Active => write!(f, "active"),
            AlertStatus::Acknowledged => write!(f, "acknowledged"),
            AlertStatus::Resolved => write!(f, "resolved"),
        }
    }
}

impl FromStr for AlertStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(AlertStatus::Active),
            "acknowledged" => Ok(AlertStatus::Acknowledged),
            "resolved" => Ok(AlertStatus::Resolved),
            _ => Err(()),
        }
    }
}

impl CapacityAlert {
    /// 创建一个新的活跃告警
    pub fn new(
        board_id: Uuid,
        alert_type: AlertType,
        alert_level: AlertLevel,
        message: String,
        workload_percentage: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            board_id,
            forecast_id: None,
            alert_type,
            alert_level,
            status: AlertStatus::Active,
            resource_id: None,
            period_start: None,
            period_end: None,
            message,
            workload_percentage,
            acknowledged_by: None,
            acknowledged_at: None,
            resolved_by: None,
            resolved_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// 关联到具体预测和成员
    pub fn for_forecast(mut self, forecast_id: Uuid, resource_id: Option<Uuid>) -> Self {
        self.forecast_id = Some(forecast_id);
        self.resource_id = resource_id;
        self
    }

    /// 记录告警所属的预测周期
    ///
    /// 不同周期的同一状况各自保留一条活跃告警
    pub fn for_period(mut self, period_start: NaiveDate, period_end: NaiveDate) -> Self {
        self.period_start = Some(period_start);
        self.period_end = Some(period_end);
        self
    }

    /// 用新一次运行的结果刷新仍活跃的告警
    ///
    /// 保留ID、状态、周期和创建时间，只更新消息、百分比和关联的预测
    pub fn refresh_from(mut self, latest: &CapacityAlert) -> Self {
        self.message = latest.message.clone();
        self.workload_percentage = latest.workload_percentage;
        self.forecast_id = latest.forecast_id;
        self.updated_at = Utc::now();
        self
    }

    /// 确认告警
    ///
    /// 仅 Active 状态可以确认
    ///
    /// # 返回值
    ///
    /// * `Ok(CapacityAlert)` - 已确认的告警
    /// * `Err(DomainError)` - 状态转换失败
    pub fn acknowledge(mut self, actor: Uuid) -> Result<Self, DomainError> {
        match self.status {
            AlertStatus::Active => {
                let now = Utc::now();
                self.status = AlertStatus::Acknowledged;
                self.acknowledged_by = Some(actor);
                self.acknowledged_at = Some(now);
                self.updated_at = now;
                Ok(self)
            }
            other => Err(DomainError::InvalidStateTransition {
                from: other.to_string(),
                action: "acknowledge",
            }),
        }
    }

    /// 解决告警
    ///
    /// Active 与 Acknowledged 状态都可以直接解决
    pub fn resolve(mut self, actor: Uuid) -> Result<Self, DomainError> {
        match self.status {
            AlertStatus::Active | AlertStatus::Acknowledged => {
                let now = Utc::now();
                self.status = AlertStatus::Resolved;
                self.resolved_by = Some(actor);
                self.resolved_at = Some(now);
                self.updated_at = now;
                Ok(self)
            }
            other => Err(DomainError::InvalidStateTransition {
                from: other.to_string(),
                action: "resolve",
            }),
        }
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::work_item::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 负载分配建议
///
/// 推荐引擎只负责提出建议；真正移动或重新分配任务属于外部任务管理系统。
/// 状态转换：
/// Pending → Accepted → Implemented，Pending/Accepted → Rejected，
/// 或 Pending → Implemented
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionRecommendation {
    /// 建议唯一标识符
    pub id: Uuid,
    /// 所属看板ID
    pub board_id: Uuid,
    /// 触发该建议的过载预测ID
    pub forecast_id: Uuid,
    /// 建议类型
    pub recommendation_type: RecommendationType,
    /// 排序等级，数值越小越先展示（1-10）
    pub priority: i32,
    /// 标题
    pub title: String,
    /// 详细描述
    pub description: String,
    /// 预计节省工时
    pub expected_capacity_savings_hours: f64,
    /// 置信度（0.0 - 1.0）
    pub confidence_score: f64,
    /// 状态
    pub status: RecommendationStatus,
    /// 涉及的工作项
    pub affected_tasks: Vec<Uuid>,
    /// 涉及的成员；重新分配时依次为来源成员和目标成员
    pub affected_users: Vec<Uuid>,
    /// 实施说明
    pub implementation_note: Option<String>,
    /// 创建时间
    pub created_at: DateTime<Utc>,
    /// 更新时间
    pub updated_at: DateTime<Utc>,
    /// 实施时间
    pub implemented_at: Option<DateTime<Utc>>,
}

/// 建议类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationType {
    /// 推迟到后续周期
    Defer,
    /// 重新分配给有空余容量的成员
    Reassign,
}

/// 建议状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationStatus {
    /// 待处理
    #[default]
    Pending,
    /// 已接受
    Accepted,
    /// 已拒绝
    Rejected,
    /// 已实施
    Implemented,
}

impl fmt::Display for RecommendationType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RecommendationType::Defer => write!(f, "defer"),
            RecommendationType::Reassign => write!(f, "reassign"),
        }
    }
}

impl FromStr for RecommendationType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "defer" => Ok(RecommendationType::Defer),
            "reassign" => Ok(RecommendationType::Reassign),
            _ => Err(()),
        }
    }
}

impl fmt::Display for RecommendationStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RecommendationStatus::Pending => write!(f, "pending"),
            RecommendationStatus::Accepted => write!(f, "accepted"),
            RecommendationStatus::Rejected => write!(f, "rejected"),
            RecommendationStatus::Implemented => write!(f, "implemented"),
        }
    }
}

impl FromStr for RecommendationStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RecommendationStatus::Pending),
            "accepted" => Ok(RecommendationStatus::Accepted),
            "rejected" => Ok(RecommendationStatus::Rejected),
            "implemented" => Ok(RecommendationStatus::Implemented),
            _ => Err(()),
        }
    }
}

impl DistributionRecommendation {
    /// 创建一个新的待处理建议
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        board_id: Uuid,
        forecast_id: Uuid,
        recommendation_type: RecommendationType,
        priority: i32,
        title: String,
        description: String,
        expected_capacity_savings_hours: f64,
        confidence_score: f64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            board_id,
            forecast_id,
            recommendation_type,
            priority,
            title,
            description,
            expected_capacity_savings_hours,
            confidence_score,
            status: RecommendationStatus::Pending,
            affected_tasks: Vec::new(),
            affected_users: Vec::new(),
            implementation_note: None,
            created_at: now,
            updated_at: now,
            implemented_at: None,
        }
    }

    /// 来源成员（被减负的人）
    pub fn source_user(&self) -> Option<Uuid> {
        self.affected_users.first().copied()
    }

    /// 目标成员（仅重新分配建议）
    pub fn target_user(&self) -> Option<Uuid> {
        match self.recommendation_type {
            RecommendationType::Reassign => self.affected_users.get(1).copied(),
            RecommendationType::Defer => None,
        }
    }

    /// 接受建议
    pub fn accept(mut self) -> Result<Self, DomainError> {
        match self.status {
            RecommendationStatus::Pending => {
                self.status = RecommendationStatus::Accepted;
                self.updated_at = Utc::now();
                Ok(self)
            }
            other => Err(DomainError::InvalidStateTransition {
                from: other.to_string(),
                action: "accept",
            }),
        }
    }

    /// 拒绝建议
    pub fn reject(mut self) -> Result<Self, DomainError> {
        match self.status {
            RecommendationStatus::Pending | RecommendationStatus::Accepted => {
                self.status = RecommendationStatus::Rejected;
                self.updated_at = Utc::now();
                Ok(self)
            }
            other => Err(DomainError::InvalidStateTransition {
                from: other.to_string(),
                action: "reject",
            }),
        }
    }

    /// 标记建议已实施
    ///
    /// # 参数
    ///
    /// * `note` - 外部实际执行的操作说明（可选）
    pub fn implement(mut self, note: Option<String>) -> Result<Self, DomainError> {
        match self.status {
            RecommendationStatus::Pending | RecommendationStatus::Accepted => {
                let now = Utc::now();
                self.status = RecommendationStatus::Implemented;
                self.implementation_note = note;
                self.implemented_at = Some(now);
                self.updated_at = now;
                Ok(self)
            }
            other => Err(DomainError::InvalidStateTransition {
                from: other.to_string(),
                action: "implement",
            }),
        }
    }
}

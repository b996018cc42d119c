// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// 工作项实体
///
/// 看板上的一张任务卡片。该实体由外部任务存储维护，
/// 预测引擎只读取它，从不修改。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkItem {
    /// 工作项唯一标识符
    pub id: Uuid,
    /// 所属看板ID
    pub board_id: Uuid,
    /// 标题
    pub title: String,
    /// 优先级
    #[serde(default)]
    pub priority: Priority,
    /// 负责人（可选，未分配时为空）
    #[serde(default)]
    pub assignee: Option<Uuid>,
    /// 所在列/生命周期状态
    #[serde(default)]
    pub status: WorkItemStatus,
    /// 截止日期
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// 显式工时估算（小时），缺省时使用每任务固定工时
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    /// 复杂度评分（0-100）
    #[serde(default)]
    pub complexity_score: Option<u8>,
}

/// 工作项优先级
///
/// 顺序从低到高：Low < Medium < High < Urgent
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// 低
    Low,
    /// 中
    #[default]
    Medium,
    /// 高
    High,
    /// 紧急
    Urgent,
}

impl Priority {
    /// 是否计入高优先级额外开销（high / urgent）
    pub fn is_high(&self) -> bool {
        matches!(self, Priority::High | Priority::Urgent)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
            Priority::Urgent => write!(f, "urgent"),
        }
    }
}

impl FromStr for Priority {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            _ => Err(()),
        }
    }
}

/// 工作项状态
///
/// 对应看板上的列：To Do → In Progress → In Review → Done
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkItemStatus {
    /// 待办
    #[default]
    Todo,
    /// 进行中
    InProgress,
    /// 评审中
    InReview,
    /// 已完成
    Done,
}

impl WorkItemStatus {
    /// 是否已完成
    pub fn is_complete(&self) -> bool {
        matches!(self, WorkItemStatus::Done)
    }

    /// 是否可以被推迟或重新分配
    ///
    /// 评审中的工作项已接近完成，不参与再平衡
    pub fn is_movable(&self) -> bool {
        matches!(self, WorkItemStatus::Todo | WorkItemStatus::InProgress)
    }
}

impl fmt::Display for WorkItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WorkItemStatus::Todo => write!(f, "todo"),
            WorkItemStatus::InProgress => write!(f, "in_progress"),
            WorkItemStatus::InReview => write!(f, "in_review"),
            WorkItemStatus::Done => write!(f, "done"),
        }
    }
}

impl FromStr for WorkItemStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(WorkItemStatus::Todo),
            "in_progress" => Ok(WorkItemStatus::InProgress),
            "in_review" => Ok(WorkItemStatus::InReview),
            "done" => Ok(WorkItemStatus::Done),
            _ => Err(()),
        }
    }
}

/// 领域错误类型
///
/// 表示在领域层可能发生的错误情况，主要是告警与建议的
/// 生命周期状态转换错误和输入验证失败。
#[derive(Error, Debug, PartialEq)]
pub enum DomainError {
    /// 无效的状态转换
    #[error("Invalid state transition: cannot {action} from {from}")]
    InvalidStateTransition {
        /// 当前状态
        from: String,
        /// 尝试执行的操作
        action: &'static str,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl WorkItem {
    /// 创建一个新的待办工作项
    pub fn new(board_id: Uuid, title: impl Into<String>, priority: Priority) -> Self {
        Self {
            id: Uuid::new_v4(),
            board_id,
            title: title.into(),
            priority,
            assignee: None,
            status: WorkItemStatus::Todo,
            due_date: None,
            estimated_hours: None,
            complexity_score: None,
        }
    }

    /// 设置负责人
    pub fn assigned_to(mut self, resource_id: Uuid) -> Self {
        self.assignee = Some(resource_id);
        self
    }

    /// 设置状态
    pub fn with_status(mut self, status: WorkItemStatus) -> Self {
        self.status = status;
        self
    }

    /// 设置截止日期
    pub fn due_on(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// 设置显式工时估算
    pub fn with_estimate(mut self, hours: f64) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    /// 设置复杂度评分
    pub fn with_complexity(mut self, score: u8) -> Self {
        self.complexity_score = Some(score);
        self
    }

    /// 是否已完成
    pub fn is_complete(&self) -> bool {
        self.status.is_complete()
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// 预测对象
///
/// 一条预测要么针对具体的人，要么针对一个角色桶（例如未分配的工作）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ResourceTarget {
    /// 具体成员
    Person(Uuid),
    /// 角色桶
    Role(String),
}

impl ResourceTarget {
    /// 如果是具体成员，返回其ID
    pub fn person_id(&self) -> Option<Uuid> {
        match self {
            ResourceTarget::Person(id) => Some(*id),
            ResourceTarget::Role(_) => None,
        }
    }
}

impl fmt::Display for ResourceTarget {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ResourceTarget::Person(id) => write!(f, "person:{}", id),
            ResourceTarget::Role(name) => write!(f, "role:{}", name),
        }
    }
}

/// 需求预测
///
/// 一个资源在某个预测周期内的预计负载。每次生成都会新建记录，
/// 同一 (看板, 资源, 周期) 的历史记录不会被覆盖，按 `run_id` 区分批次。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandForecast {
    /// 预测唯一标识符
    pub id: Uuid,
    /// 生成批次ID，同一次运行产生的预测共享该ID
    pub run_id: Uuid,
    /// 在批次中的位置
    pub run_position: i32,
    /// 所属看板ID
    pub board_id: Uuid,
    /// 预测对象
    pub target: ResourceTarget,
    /// 角色/显示标签
    pub role_label: Option<String>,
    /// 周期开始日期
    pub period_start: NaiveDate,
    /// 周期结束日期
    pub period_end: NaiveDate,
    /// 预计工作量（小时）
    pub predicted_workload_hours: f64,
    /// 可用容量（小时）
    pub available_capacity_hours: f64,
    /// 置信度（0.0 - 1.0）
    pub confidence_score: f64,
    /// 创建时间，同一批次共享
    pub created_at: DateTime<Utc>,
}

impl DemandForecast {
    /// 利用率百分比
    ///
    /// 可用容量为 0 时返回 0，而不是除零错误
    pub fn utilization_percentage(&self) -> f64 {
        utilization_percentage(self.predicted_workload_hours, self.available_capacity_hours)
    }

    /// 是否过载（利用率 >= 100%）
    pub fn is_overloaded(&self) -> bool {
        self.utilization_percentage() >= 100.0
    }

    /// 剩余容量（可能为负）
    pub fn headroom_hours(&self) -> f64 {
        self.available_capacity_hours - self.predicted_workload_hours
    }

    /// 用于展示的名称
    pub fn label(&self) -> String {
        match &self.role_label {
            Some(label) => label.clone(),
            None => self.target.to_string(),
        }
    }
}

/// 计算利用率百分比
///
/// 先乘后除，整数输入（如 96/120）得到精确的 80.0
pub fn utilization_percentage(predicted_hours: f64, available_hours: f64) -> f64 {
    if available_hours <= 0.0 {
        return 0.0;
    }
    predicted_hours * 100.0 / available_hours
}

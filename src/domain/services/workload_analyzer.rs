// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::forecast::DemandForecast;
use crate::domain::models::work_item::{Priority, WorkItem};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const BASE_TASK_HOURS: f64 = 4.0;
const COMPLEXITY_NORMALIZER: f64 = 50.0;

/// 任务影响等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// 单个任务的工作量影响
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskWorkloadImpact {
    pub estimated_hours: f64,
    pub impact_level: ImpactLevel,
    pub multiplier: f64,
}

/// 工作量分析器
pub struct WorkloadAnalyzer;

impl WorkloadAnalyzer {
    fn priority_multiplier(priority: Priority) -> f64 {
        match priority {
            Priority::Low => 1.0,
            Priority::Medium => 1.5,
            Priority::High => 2.0,
            Priority::Urgent => 3.0,
        }
    }

    /// 估算任务对负载的影响
    ///
    /// 复杂度分数（0-100）归一化为 0-2 的系数；未设置或为 0 时不调整
    pub fn task_workload_impact(item: &WorkItem) -> TaskWorkloadImpact {
        let multiplier = Self::priority_multiplier(item.priority);
        let mut estimated_hours = BASE_TASK_HOURS * multiplier;
        if let Some(score) = item.complexity_score.filter(|s| *s > 0) {
            estimated_hours *= f64::from(score) / COMPLEXITY_NORMALIZER;
        }

        let impact_level = if estimated_hours < 2.0 {
            ImpactLevel::Low
        } else if estimated_hours < 4.0 {
            ImpactLevel::Medium
        } else if estimated_hours < 8.0 {
            ImpactLevel::High
        } else {
            ImpactLevel::Critical
        };

        TaskWorkloadImpact {
            estimated_hours,
            impact_level,
            multiplier,
        }
    }

    /// 从一次运行的预测中挑选最合适的负责人
    ///
    /// 按预计工作量升序取第一个未过载的成员；全部过载时取负载最轻的；
    /// 没有个人预测时返回 None
    pub fn find_optimal_assignee(
        forecasts: &[DemandForecast],
        exclude: Option<Uuid>,
    ) -> Option<Uuid> {
        let mut candidates: Vec<(&DemandForecast, Uuid)> = forecasts
            .iter()
            .filter_map(|f| f.target.person_id().map(|id| (f, id)))
            .filter(|(_, id)| Some(*id) != exclude)
            .collect();
        candidates.sort_by(|(a, _), (b, _)| {
            a.predicted_workload_hours
                .total_cmp(&b.predicted_workload_hours)
        });

        candidates
            .iter()
            .find(|(f, _)| !f.is_overloaded())
            .or_else(|| candidates.first())
            .map(|(_, id)| *id)
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::ForecastSettings;
use crate::domain::models::work_item::{DomainError, WorkItem};
use serde::Serialize;

/// 当前负载估算结果
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WorkloadEstimate {
    /// 未完成工作项数量
    pub open_items: usize,
    /// 其中 high/urgent 的数量
    pub high_priority_items: usize,
    /// 估算工时
    pub hours: f64,
}

/// 负载估算器
///
/// 把成员已分配且未完成的工作项换算成工时：每项使用显式估算，
/// 没有估算时使用固定工时；每个 high/urgent 工作项再加固定开销。
#[derive(Debug, Clone)]
pub struct WorkloadEstimator {
    hours_per_task: f64,
    priority_overhead_hours: f64,
}

impl WorkloadEstimator {
    pub fn new(settings: &ForecastSettings) -> Self {
        Self {
            hours_per_task: settings.hours_per_task,
            priority_overhead_hours: settings.priority_overhead_hours,
        }
    }

    /// 估算当前负载
    ///
    /// # 参数
    ///
    /// * `items` - 成员在看板上被分配的工作项，已完成的会被忽略
    ///
    /// # 返回值
    ///
    /// * `Ok(WorkloadEstimate)` - 估算结果，没有未完成工作项时为 0
    /// * `Err(DomainError)` - 工作项的显式估算为负数或非有限值
    pub fn estimate(&self, items: &[WorkItem]) -> Result<WorkloadEstimate, DomainError> {
        let mut estimate = WorkloadEstimate {
            open_items: 0,
            high_priority_items: 0,
            hours: 0.0,
        };

        for item in items.iter().filter(|item| !item.is_complete()) {
            let base = match item.estimated_hours {
                Some(hours) if !hours.is_finite() || hours < 0.0 => {
                    return Err(DomainError::ValidationError(format!(
                        "work item {} has invalid estimate {}",
                        item.id, hours
                    )));
                }
                Some(hours) => hours,
                None => self.hours_per_task,
            };

            estimate.open_items += 1;
            estimate.hours += base;
            if item.priority.is_high() {
                estimate.high_priority_items += 1;
                estimate.hours += self.priority_overhead_hours;
            }
        }

        Ok(estimate)
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::{CapacityModel, ForecastSettings};
use crate::domain::models::forecast::{DemandForecast, ResourceTarget};
use crate::domain::models::work_item::DomainError;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use uuid::Uuid;

/// 单个资源的预测输入
#[derive(Debug, Clone)]
pub struct ForecastInput {
    pub board_id: Uuid,
    pub target: ResourceTarget,
    pub role_label: Option<String>,
    pub period_start: NaiveDate,
    pub period_days: i64,
    /// 当前未完成工作的估算工时
    pub current_workload_hours: f64,
    /// 档案中的每周容量；None 表示未配置
    pub weekly_capacity_hours: Option<f64>,
    /// 成员在看板上的历史任务总数
    pub historical_task_count: usize,
}

/// 同一批次的公共信息
#[derive(Debug, Clone, Copy)]
pub struct RunContext {
    pub run_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl RunContext {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 预测计算器
///
/// 可用容量只取决于周期长度和容量模型，与任务数据无关；
/// 预计工作量 = 当前负载 × 趋势乘数；置信度是历史任务数的阶梯函数。
#[derive(Debug, Clone)]
pub struct ForecastCalculator {
    settings: ForecastSettings,
}

impl ForecastCalculator {
    pub fn new(settings: &ForecastSettings) -> Self {
        Self {
            settings: settings.clone(),
        }
    }

    /// 周期内的可用容量（小时）
    ///
    /// 与周期长度成线性关系，忽略节假日和非整周
    pub fn available_capacity(&self, period_days: i64, weekly_capacity_hours: Option<f64>) -> f64 {
        let weeks = period_days.max(0) as f64 / 7.0;
        let weekly = match self.settings.capacity_model {
            CapacityModel::FixedWorkingDays => self.settings.standard_weekly_hours(),
            CapacityModel::ProfileHours => weekly_capacity_hours
                .unwrap_or_else(|| self.settings.standard_weekly_hours()),
        };
        weeks * weekly
    }

    /// 预计工作量
    pub fn predict_workload(&self, current_workload_hours: f64) -> f64 {
        current_workload_hours * self.settings.trend_multiplier
    }

    /// 置信度
    pub fn confidence(&self, historical_task_count: usize) -> f64 {
        if historical_task_count < self.settings.medium_confidence_min_tasks {
            self.settings.low_confidence
        } else if historical_task_count < self.settings.high_confidence_min_tasks {
            self.settings.medium_confidence
        } else {
            self.settings.high_confidence
        }
    }

    /// 生成一条需求预测
    ///
    /// # 返回值
    ///
    /// * `Ok(DemandForecast)` - 预测结果
    /// * `Err(DomainError)` - 容量档案数据无效（负数或非有限值）
    pub fn calculate(
        &self,
        run: &RunContext,
        run_position: i32,
        input: ForecastInput,
    ) -> Result<DemandForecast, DomainError> {
        if let Some(weekly) = input.weekly_capacity_hours {
            if !weekly.is_finite() || weekly < 0.0 {
                return Err(DomainError::ValidationError(format!(
                    "invalid weekly capacity {} for {}",
                    weekly, input.target
                )));
            }
        }

        Ok(DemandForecast {
            id: Uuid::new_v4(),
            run_id: run.run_id,
            run_position,
            board_id: input.board_id,
            target: input.target,
            role_label: input.role_label,
            period_start: input.period_start,
            period_end: input.period_start + Duration::days(input.period_days),
            predicted_workload_hours: self.predict_workload(input.current_workload_hours),
            available_capacity_hours: self
                .available_capacity(input.period_days, input.weekly_capacity_hours),
            confidence_score: self.confidence(input.historical_task_count),
            created_at: run.created_at,
        })
    }
}

#[cfg(test)]
#[path = "forecast_calculator_test.rs"]
mod tests;

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::alert::{AlertLevel, AlertStatus, CapacityAlert};
use crate::domain::models::forecast::{utilization_percentage, DemandForecast};
use serde::{Deserialize, Serialize};

/// 预测汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub total_capacity: f64,
    pub total_workload: f64,
    pub team_utilization_percent: f64,
    pub average_confidence: f64,
    pub overloaded_members: usize,
    pub total_members: usize,
    pub active_alerts: usize,
    pub critical_alerts: usize,
    pub warning_alerts: usize,
}

/// 团队容量图表数据
///
/// 各数组按下标一一对应
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapacityChart {
    pub labels: Vec<String>,
    pub capacity: Vec<f64>,
    pub workload: Vec<f64>,
    pub utilization: Vec<f64>,
    pub overloaded: Vec<bool>,
}

/// 预测汇总报告器
///
/// 纯聚合计算，没有副作用
pub struct ForecastSummaryReporter;

impl ForecastSummaryReporter {
    /// 团队利用率
    ///
    /// 总预计工作量 / 总可用容量 × 100，而不是个人利用率的平均值
    pub fn team_utilization(forecasts: &[DemandForecast]) -> f64 {
        let (predicted, available) = Self::totals(forecasts);
        utilization_percentage(predicted, available)
    }

    /// 汇总 (总预计工作量, 总可用容量)
    pub fn totals(forecasts: &[DemandForecast]) -> (f64, f64) {
        forecasts.iter().fold((0.0, 0.0), |(predicted, available), f| {
            (
                predicted + f.predicted_workload_hours,
                available + f.available_capacity_hours,
            )
        })
    }

    /// 生成汇总
    ///
    /// # 参数
    ///
    /// * `forecasts` - 一次运行的预测
    /// * `alerts` - 看板的告警，只统计活跃状态的
    ///
    /// # 返回值
    ///
    /// 没有预测时返回 None
    pub fn summarize(
        forecasts: &[DemandForecast],
        alerts: &[CapacityAlert],
    ) -> Option<ForecastSummary> {
        if forecasts.is_empty() {
            return None;
        }

        let (total_workload, total_capacity) = Self::totals(forecasts);
        let average_confidence =
            forecasts.iter().map(|f| f.confidence_score).sum::<f64>() / forecasts.len() as f64;
        let active: Vec<&CapacityAlert> = alerts
            .iter()
            .filter(|a| a.status == AlertStatus::Active)
            .collect();

        Some(ForecastSummary {
            total_capacity,
            total_workload,
            team_utilization_percent: utilization_percentage(total_workload, total_capacity),
            average_confidence,
            overloaded_members: forecasts.iter().filter(|f| f.is_overloaded()).count(),
            total_members: forecasts.len(),
            active_alerts: active.len(),
            critical_alerts: active
                .iter()
                .filter(|a| a.alert_level == AlertLevel::Critical)
                .count(),
            warning_alerts: active
                .iter()
                .filter(|a| a.alert_level == AlertLevel::Warning)
                .count(),
        })
    }

    /// 生成容量图表数据
    pub fn capacity_chart(forecasts: &[DemandForecast]) -> CapacityChart {
        let mut chart = CapacityChart::default();
        for forecast in forecasts {
            chart.labels.push(forecast.label());
            chart.capacity.push(forecast.available_capacity_hours);
            chart.workload.push(forecast.predicted_workload_hours);
            chart.utilization.push(forecast.utilization_percentage());
            chart.overloaded.push(forecast.is_overloaded());
        }
        chart
    }
}

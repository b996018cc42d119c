// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::ForecastSettings;
use crate::domain::models::alert::{AlertLevel, AlertType, CapacityAlert};
use crate::domain::models::forecast::DemandForecast;
use crate::domain::services::summary_reporter::ForecastSummaryReporter;
use std::collections::HashMap;
use uuid::Uuid;

/// 告警引擎
///
/// 对每条预测以及整个团队的汇总利用率应用警告/严重阈值。
/// 引擎只产生新的活跃告警，不负责状态流转。
#[derive(Debug, Clone)]
pub struct AlertEngine {
    warning_threshold: f64,
    critical_threshold: f64,
}

impl AlertEngine {
    pub fn new(settings: &ForecastSettings) -> Self {
        Self {
            warning_threshold: settings.warning_threshold_percent,
            critical_threshold: settings.critical_threshold_percent,
        }
    }

    /// 根据利用率判定告警级别
    ///
    /// 恰好等于严重阈值时为严重，恰好等于警告阈值时为警告
    pub fn classify(&self, utilization_percentage: f64) -> Option<AlertLevel> {
        if utilization_percentage >= self.critical_threshold {
            Some(AlertLevel::Critical)
        } else if utilization_percentage >= self.warning_threshold {
            Some(AlertLevel::Warning)
        } else {
            None
        }
    }

    /// 评估一次运行的全部预测
    ///
    /// 先逐条生成个人告警，最后最多生成一条团队告警
    pub fn evaluate(&self, board_id: Uuid, forecasts: &[DemandForecast]) -> Vec<CapacityAlert> {
        self.evaluate_named(board_id, forecasts, &HashMap::new())
    }

    /// 同 [`evaluate`](Self::evaluate)，告警消息优先使用成员的显示名称
    pub fn evaluate_named(
        &self,
        board_id: Uuid,
        forecasts: &[DemandForecast],
        display_names: &HashMap<Uuid, String>,
    ) -> Vec<CapacityAlert> {
        let mut alerts: Vec<CapacityAlert> = forecasts
            .iter()
            .filter_map(|forecast| {
                let name = forecast
                    .target
                    .person_id()
                    .and_then(|id| display_names.get(&id).cloned())
                    .unwrap_or_else(|| forecast.label());
                self.evaluate_individual(board_id, forecast, &name)
            })
            .collect();

        if let Some(team_alert) = self.evaluate_team(board_id, forecasts) {
            alerts.push(team_alert);
        }

        alerts
    }

    fn evaluate_individual(
        &self,
        board_id: Uuid,
        forecast: &DemandForecast,
        name: &str,
    ) -> Option<CapacityAlert> {
        let utilization = forecast.utilization_percentage();
        let level = self.classify(utilization)?;
        let message = match level {
            AlertLevel::Critical => format!(
                "{} is critically overloaded ({:.0}% capacity)",
                name, utilization
            ),
            AlertLevel::Warning => format!("{} is near capacity ({:.0}%)", name, utilization),
        };

        Some(
            CapacityAlert::new(
                board_id,
                AlertType::Individual,
                level,
                message,
                utilization as i32,
            )
            .for_forecast(forecast.id, forecast.target.person_id())
            .for_period(forecast.period_start, forecast.period_end),
        )
    }

    fn evaluate_team(&self, board_id: Uuid, forecasts: &[DemandForecast]) -> Option<CapacityAlert> {
        // 一次运行的全部预测共享同一周期
        let period = forecasts.first()?;
        let utilization = ForecastSummaryReporter::team_utilization(forecasts);
        let level = self.classify(utilization)?;
        let message = match level {
            AlertLevel::Critical => format!(
                "Team is critically overloaded ({:.0}% total capacity)",
                utilization
            ),
            AlertLevel::Warning => {
                format!("Team is near capacity ({:.0}% total capacity)", utilization)
            }
        };

        Some(
            CapacityAlert::new(
                board_id,
                AlertType::Team,
                level,
                message,
                utilization as i32,
            )
            .for_period(period.period_start, period.period_end),
        )
    }
}

#[cfg(test)]
#[path = "alert_engine_test.rs"]
mod tests;

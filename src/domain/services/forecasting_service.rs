// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::ForecastSettings;
use crate::domain::models::alert::{AlertStatus, CapacityAlert};
use crate::domain::models::board::Board;
use crate::domain::models::forecast::{DemandForecast, ResourceTarget};
use crate::domain::models::recommendation::{DistributionRecommendation, RecommendationStatus};
use crate::domain::repositories::alert_repository::{ActiveAlertKey, AlertRepository};
use crate::domain::repositories::board_repository::{
    BoardReadPort, RepositoryError, RoleDirectory,
};
use crate::domain::repositories::forecast_repository::{ForecastQuery, ForecastRepository};
use crate::domain::repositories::recommendation_repository::RecommendationRepository;
use crate::domain::repositories::run_repository::{AlertWrite, RunRecorder};
use crate::domain::services::alert_engine::AlertEngine;
use crate::domain::services::forecast_calculator::{ForecastCalculator, ForecastInput, RunContext};
use crate::domain::services::recommendation_engine::{RecommendationEngine, RecommendationInput};
use crate::domain::services::summary_reporter::{
    CapacityChart, ForecastSummary, ForecastSummaryReporter,
};
use crate::domain::services::workload_analyzer::{TaskWorkloadImpact, WorkloadAnalyzer};
use crate::domain::services::workload_estimator::WorkloadEstimator;
use chrono::{Duration, NaiveDate, Utc};
use dashmap::DashMap;
use futures::future::join_all;
use metrics::{counter, histogram};
use serde::Serialize;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// 未分配工作的角色桶名称
pub const UNASSIGNED_ROLE: &str = "unassigned";

/// 寻找推荐负责人时使用的预测周期
const ASSIGNEE_LOOKAHEAD_DAYS: i64 = 21;

/// 预测服务错误
#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Board not found: {0}")]
    BoardNotFound(Uuid),
    #[error("Work item not found: {0}")]
    WorkItemNotFound(Uuid),
    #[error("Forecast run for board {board_id} timed out after {secs}s")]
    Timeout { board_id: Uuid, secs: u64 },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// 一次预测运行的结果
#[derive(Debug, Clone, Serialize)]
pub struct ForecastRun {
    pub run_id: Uuid,
    pub board_id: Uuid,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub forecasts: Vec<DemandForecast>,
    pub alerts: Vec<CapacityAlert>,
    pub team_utilization: f64,
    pub total_capacity: f64,
    pub total_predicted_workload: f64,
}

/// 负责人推荐结果
#[derive(Debug, Clone, Serialize)]
pub struct AssigneeSuggestion {
    pub work_item_id: Uuid,
    pub current_assignee: Option<Uuid>,
    pub suggested_assignee: Option<Uuid>,
    pub impact: TaskWorkloadImpact,
}

/// 容量预测服务
///
/// 编排 WorkloadEstimator → ForecastCalculator → AlertEngine / RecommendationEngine
/// → ForecastSummaryReporter 的完整流程。
/// 同一看板的运行互斥执行，并受 `run_timeout_secs` 限制；不同看板之间并发。
pub struct ForecastingService {
    board_source: Arc<dyn BoardReadPort>,
    role_directory: Option<Arc<dyn RoleDirectory>>,
    forecast_repo: Arc<dyn ForecastRepository>,
    alert_repo: Arc<dyn AlertRepository>,
    recommendation_repo: Arc<dyn RecommendationRepository>,
    run_recorder: Option<Arc<dyn RunRecorder>>,
    settings: ForecastSettings,
    estimator: WorkloadEstimator,
    calculator: ForecastCalculator,
    alert_engine: AlertEngine,
    recommendation_engine: RecommendationEngine,
    board_locks: Arc<DashMap<Uuid, Arc<Mutex<()>>>>,
}

impl ForecastingService {
    /// 创建预测服务
    ///
    /// # 参数
    ///
    /// * `board_source` - 看板/任务只读数据源
    /// * `forecast_repo` - 预测记录仓库
    /// * `alert_repo` - 告警仓库
    /// * `recommendation_repo` - 建议仓库
    /// * `settings` - 预测参数
    pub fn new(
        board_source: Arc<dyn BoardReadPort>,
        forecast_repo: Arc<dyn ForecastRepository>,
        alert_repo: Arc<dyn AlertRepository>,
        recommendation_repo: Arc<dyn RecommendationRepository>,
        settings: ForecastSettings,
    ) -> Self {
        Self {
            board_source,
            role_directory: None,
            forecast_repo,
            alert_repo,
            recommendation_repo,
            run_recorder: None,
            estimator: WorkloadEstimator::new(&settings),
            calculator: ForecastCalculator::new(&settings),
            alert_engine: AlertEngine::new(&settings),
            recommendation_engine: RecommendationEngine::new(&settings),
            settings,
            board_locks: Arc::new(DashMap::new()),
        }
    }

    /// 配置角色目录，用于填充预测的角色标签
    pub fn with_role_directory(mut self, role_directory: Arc<dyn RoleDirectory>) -> Self {
        self.role_directory = Some(role_directory);
        self
    }

    /// 配置运行记录器，使一次运行的预测和告警整体写入
    pub fn with_run_recorder(mut self, run_recorder: Arc<dyn RunRecorder>) -> Self {
        self.run_recorder = Some(run_recorder);
        self
    }

    pub fn settings(&self) -> &ForecastSettings {
        &self.settings
    }

    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }

    fn board_lock(&self, board_id: Uuid) -> Arc<Mutex<()>> {
        self.board_locks
            .entry(board_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// 在看板锁和超时保护下执行
    async fn guarded<T, F>(&self, board_id: Uuid, work: F) -> Result<T, ForecastError>
    where
        F: Future<Output = Result<T, ForecastError>>,
    {
        let lock = self.board_lock(board_id);
        let secs = self.settings.run_timeout_secs;
        let guarded = async {
            let _guard = lock.lock().await;
            work.await
        };

        match tokio::time::timeout(std::time::Duration::from_secs(secs), guarded).await {
            Ok(result) => result,
            Err(_) => Err(ForecastError::Timeout { board_id, secs }),
        }
    }

    async fn require_board(&self, board_id: Uuid) -> Result<Board, ForecastError> {
        self.board_source
            .find_board(board_id)
            .await?
            .ok_or(ForecastError::BoardNotFound(board_id))
    }

    /// 为看板生成容量预测
    ///
    /// # 参数
    ///
    /// * `board_id` - 看板ID
    /// * `days_ahead` - 预测天数，超出允许范围时回退到默认值
    ///
    /// # 返回值
    ///
    /// * `Ok(ForecastRun)` - 本次运行的预测和告警；没有可预测成员时为空结果
    /// * `Err(ForecastError)` - 看板不存在、超时或写入失败
    pub async fn generate_forecast(
        &self,
        board_id: Uuid,
        days_ahead: Option<i64>,
    ) -> Result<ForecastRun, ForecastError> {
        let started = Instant::now();
        let result = self
            .guarded(board_id, self.run_forecast(board_id, days_ahead))
            .await;

        match &result {
            Ok(_) => {
                histogram!("capacity_forecast_run_duration_seconds")
                    .record(started.elapsed().as_secs_f64());
            }
            Err(e) => {
                counter!("capacity_forecast_runs_failed_total").increment(1);
                warn!("Forecast run for board {} failed: {}", board_id, e);
            }
        }
        result
    }

    async fn run_forecast(
        &self,
        board_id: Uuid,
        days_ahead: Option<i64>,
    ) -> Result<ForecastRun, ForecastError> {
        let board = self.require_board(board_id).await?;
        let period_days = self.settings.normalize_period(days_ahead);
        let period_start = self.today();
        let period_end = period_start + Duration::days(period_days);
        let run = RunContext::new();

        let mut forecasts = Vec::new();
        let mut display_names = HashMap::new();
        for member in &board.members {
            let position = forecasts.len() as i32;
            match self
                .forecast_member(&board, *member, &run, position, period_start, period_days)
                .await
            {
                Ok(Some((forecast, name))) => {
                    display_names.insert(*member, name);
                    forecasts.push(forecast);
                }
                Ok(None) => debug!("Member {} has no capacity profile, skipped", member),
                Err(e) => warn!("Skipping member {} on board {}: {}", member, board_id, e),
            }
        }

        if self.settings.forecast_unassigned_work {
            let position = forecasts.len() as i32;
            match self
                .forecast_unassigned(&board, &run, position, period_start, period_days)
                .await
            {
                Ok(Some(forecast)) => forecasts.push(forecast),
                Ok(None) => {}
                Err(e) => warn!("Skipping unassigned work on board {}: {}", board_id, e),
            }
        }

        let candidates = self
            .alert_engine
            .evaluate_named(board_id, &forecasts, &display_names);
        let writes = self.plan_alert_writes(candidates).await?;
        let alerts = self.record_run(&forecasts, &writes).await?;

        counter!("capacity_forecasts_total").increment(forecasts.len() as u64);
        for alert in &alerts {
            counter!("capacity_alerts_total", "level" => alert.alert_level.to_string())
                .increment(1);
        }

        let (total_predicted_workload, total_capacity) = ForecastSummaryReporter::totals(&forecasts);
        let team_utilization = ForecastSummaryReporter::team_utilization(&forecasts);

        info!(
            "Forecast run {} for board {} ({} to {}): {} forecasts, {} alerts, team utilization {:.1}%",
            run.run_id,
            board_id,
            period_start,
            period_end,
            forecasts.len(),
            alerts.len(),
            team_utilization
        );

        Ok(ForecastRun {
            run_id: run.run_id,
            board_id,
            period_start,
            period_end,
            forecasts,
            alerts,
            team_utilization,
            total_capacity,
            total_predicted_workload,
        })
    }

    /// 为单个成员生成预测；没有容量档案时返回 None
    async fn forecast_member(
        &self,
        board: &Board,
        member: Uuid,
        run: &RunContext,
        position: i32,
        period_start: NaiveDate,
        period_days: i64,
    ) -> anyhow::Result<Option<(DemandForecast, String)>> {
        let Some(profile) = self.board_source.find_profile(member).await? else {
            return Ok(None);
        };

        let items = self.board_source.assigned_work_items(board.id, member).await?;
        let workload = self.estimator.estimate(&items)?;
        let role_label = self.role_label(member, &profile.display_name).await;

        let forecast = self.calculator.calculate(
            run,
            position,
            ForecastInput {
                board_id: board.id,
                target: ResourceTarget::Person(member),
                role_label: Some(role_label),
                period_start,
                period_days,
                current_workload_hours: workload.hours,
                weekly_capacity_hours: profile.weekly_capacity_hours,
                historical_task_count: items.len(),
            },
        )?;

        debug!(
            "Member {} on board {}: {} open items, {:.1}h predicted of {:.1}h available",
            member,
            board.id,
            workload.open_items,
            forecast.predicted_workload_hours,
            forecast.available_capacity_hours
        );
        Ok(Some((forecast, profile.display_name)))
    }

    async fn role_label(&self, member: Uuid, display_name: &str) -> String {
        let Some(directory) = &self.role_directory else {
            return display_name.to_string();
        };
        match directory.role_of(member).await {
            Ok(Some(role)) if !role.is_empty() => role,
            Ok(_) => display_name.to_string(),
            Err(e) => {
                warn!("Role lookup for {} failed: {}", member, e);
                display_name.to_string()
            }
        }
    }

    /// 未分配工作的角色桶：可用容量为 0，预计工时计入团队总量
    async fn forecast_unassigned(
        &self,
        board: &Board,
        run: &RunContext,
        position: i32,
        period_start: NaiveDate,
        period_days: i64,
    ) -> anyhow::Result<Option<DemandForecast>> {
        let items = self.board_source.unassigned_work_items(board.id).await?;
        let workload = self.estimator.estimate(&items)?;
        if workload.open_items == 0 {
            return Ok(None);
        }

        let mut forecast = self.calculator.calculate(
            run,
            position,
            ForecastInput {
                board_id: board.id,
                target: ResourceTarget::Role(UNASSIGNED_ROLE.to_string()),
                role_label: Some("Unassigned work".to_string()),
                period_start,
                period_days,
                current_workload_hours: workload.hours,
                weekly_capacity_hours: Some(0.0),
                historical_task_count: items.len(),
            },
        )?;
        forecast.available_capacity_hours = 0.0;
        Ok(Some(forecast))
    }

    /// 决定每条候选告警是新建还是刷新已有的活跃告警
    async fn plan_alert_writes(
        &self,
        candidates: Vec<CapacityAlert>,
    ) -> Result<Vec<AlertWrite>, ForecastError> {
        let mut writes = Vec::with_capacity(candidates.len());
        for alert in candidates {
            if self.settings.dedupe_active_alerts {
                let key = ActiveAlertKey::of(&alert);
                if let Some(existing) = self.alert_repo.find_active(&key).await? {
                    debug!("Refreshing active alert {}", existing.id);
                    writes.push(AlertWrite::Refresh {
                        refreshed: existing.refresh_from(&alert),
                        fallback: alert,
                    });
                    continue;
                }
            }
            writes.push(AlertWrite::Create(alert));
        }
        Ok(writes)
    }

    /// 持久化一次运行
    ///
    /// 配置了运行记录器时整体写入。否则先写告警，最后一次性写入预测，
    /// 失败或超时的运行不会留下能被 `latest_run` 读到的预测
    async fn record_run(
        &self,
        forecasts: &[DemandForecast],
        writes: &[AlertWrite],
    ) -> Result<Vec<CapacityAlert>, ForecastError> {
        if let Some(recorder) = &self.run_recorder {
            return Ok(recorder.record_run(forecasts, writes).await?);
        }

        let mut persisted = Vec::with_capacity(writes.len());
        for write in writes {
            persisted.push(self.write_alert(write).await?);
        }
        if !forecasts.is_empty() {
            self.forecast_repo.create_many(forecasts).await?;
        }
        Ok(persisted)
    }

    async fn write_alert(&self, write: &AlertWrite) -> Result<CapacityAlert, RepositoryError> {
        if let AlertWrite::Refresh { refreshed, .. } = write {
            match self
                .alert_repo
                .update_if_status(refreshed, AlertStatus::Active)
                .await
            {
                Ok(alert) => return Ok(alert),
                Err(RepositoryError::Conflict) => {
                    debug!("Alert {} is no longer active, raising a new one", refreshed.id)
                }
                Err(e) => return Err(e),
            }
        }
        self.alert_repo.create(write.fallback()).await
    }

    /// 为看板生成负载分配建议
    ///
    /// 读取与 (今天, 今天 + period_days) 精确匹配的最近一次运行；没有预测时返回空列表
    pub async fn generate_recommendations(
        &self,
        board_id: Uuid,
        period_days: Option<i64>,
    ) -> Result<Vec<DistributionRecommendation>, ForecastError> {
        self.guarded(board_id, self.run_recommendations(board_id, period_days))
            .await
    }

    async fn run_recommendations(
        &self,
        board_id: Uuid,
        period_days: Option<i64>,
    ) -> Result<Vec<DistributionRecommendation>, ForecastError> {
        self.require_board(board_id).await?;
        let period_days = self.settings.normalize_period(period_days);
        let period_start = self.today();
        let forecasts = self
            .forecast_repo
            .latest_run(ForecastQuery {
                board_id,
                period_start: Some(period_start),
                period_end: Some(period_start + Duration::days(period_days)),
                ..Default::default()
            })
            .await?;

        if !forecasts.iter().any(|f| f.is_overloaded()) {
            debug!("No overloaded members on board {}, nothing to recommend", board_id);
            return Ok(Vec::new());
        }

        let lookups = forecasts.iter().filter_map(|forecast| {
            let member = forecast.target.person_id()?;
            let overloaded = forecast.is_overloaded();
            Some(async move {
                let items = if overloaded {
                    Some(self.board_source.assigned_work_items(board_id, member).await)
                } else {
                    None
                };
                let profile = self.board_source.find_profile(member).await;
                (member, items, profile)
            })
        });

        let mut input = RecommendationInput {
            forecasts: &forecasts,
            ..Default::default()
        };
        for (member, items, profile) in join_all(lookups).await {
            match items {
                Some(Ok(items)) => {
                    input.work_items.insert(member, items);
                }
                Some(Err(e)) => warn!("Skipping work items of {}: {}", member, e),
                None => {}
            }
            if let Ok(Some(profile)) = profile {
                input.display_names.insert(member, profile.display_name);
            }
        }

        let recommendations = self.recommendation_engine.recommend(board_id, &input);
        let mut persisted = Vec::with_capacity(recommendations.len());
        for recommendation in &recommendations {
            persisted.push(self.recommendation_repo.create(recommendation).await?);
            counter!(
                "capacity_recommendations_total",
                "type" => recommendation.recommendation_type.to_string()
            )
            .increment(1);
        }

        info!(
            "Generated {} recommendations for board {}",
            persisted.len(),
            board_id
        );
        Ok(persisted)
    }

    /// 预测汇总
    ///
    /// 使用开始于今天、结束不晚于今天 + days 的最近一次运行和看板的全部活跃告警；
    /// 没有预测时返回 None
    pub async fn get_forecast_summary(
        &self,
        board_id: Uuid,
        days: Option<i64>,
    ) -> Result<Option<ForecastSummary>, ForecastError> {
        self.require_board(board_id).await?;
        let days = days.unwrap_or(self.settings.default_period_days).max(0);
        let period_start = self.today();
        let forecasts = self
            .forecast_repo
            .latest_run(ForecastQuery {
                board_id,
                period_start: Some(period_start),
                period_end_max: Some(period_start + Duration::days(days)),
                ..Default::default()
            })
            .await?;
        let alerts = self
            .alert_repo
            .list_by_board(board_id, &[AlertStatus::Active])
            .await?;

        Ok(ForecastSummaryReporter::summarize(&forecasts, &alerts))
    }

    /// 最近 `limit` 条预测的图表数据
    pub async fn capacity_chart(
        &self,
        board_id: Uuid,
        limit: Option<u64>,
    ) -> Result<CapacityChart, ForecastError> {
        self.require_board(board_id).await?;
        let forecasts = self
            .forecast_repo
            .query(ForecastQuery {
                limit: Some(limit.unwrap_or(20)),
                ..ForecastQuery::for_board(board_id)
            })
            .await?;
        Ok(ForecastSummaryReporter::capacity_chart(&forecasts))
    }

    /// 为工作项推荐负责人
    pub async fn suggest_assignee(
        &self,
        board_id: Uuid,
        item_id: Uuid,
    ) -> Result<AssigneeSuggestion, ForecastError> {
        let item = self
            .board_source
            .find_work_item(board_id, item_id)
            .await?
            .ok_or(ForecastError::WorkItemNotFound(item_id))?;

        let period_start = self.today();
        let forecasts = self
            .forecast_repo
            .latest_run(ForecastQuery {
                board_id,
                period_start: Some(period_start),
                period_end_max: Some(period_start + Duration::days(ASSIGNEE_LOOKAHEAD_DAYS)),
                ..Default::default()
            })
            .await?;

        Ok(AssigneeSuggestion {
            work_item_id: item.id,
            current_assignee: item.assignee,
            suggested_assignee: WorkloadAnalyzer::find_optimal_assignee(&forecasts, item.assignee),
            impact: WorkloadAnalyzer::task_workload_impact(&item),
        })
    }

    /// 列出看板告警；不指定状态时返回全部
    pub async fn list_alerts(
        &self,
        board_id: Uuid,
        status: Option<AlertStatus>,
    ) -> Result<Vec<CapacityAlert>, ForecastError> {
        let statuses: Vec<AlertStatus> = status.into_iter().collect();
        Ok(self.alert_repo.list_by_board(board_id, &statuses).await?)
    }

    /// 列出看板建议
    pub async fn list_recommendations(
        &self,
        board_id: Uuid,
        status: Option<RecommendationStatus>,
    ) -> Result<Vec<DistributionRecommendation>, ForecastError> {
        Ok(self
            .recommendation_repo
            .list_by_board(board_id, status)
            .await?)
    }
}

#[cfg(test)]
#[path = "forecasting_service_test.rs"]
mod tests;

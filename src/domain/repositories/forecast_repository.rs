// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::forecast::DemandForecast;
use crate::domain::repositories::board_repository::RepositoryError;
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

/// 预测查询参数
#[derive(Debug, Default, Clone)]
pub struct ForecastQuery {
    pub board_id: Uuid,
    /// 周期开始日期精确匹配
    pub period_start: Option<NaiveDate>,
    /// 周期结束日期精确匹配
    pub period_end: Option<NaiveDate>,
    /// 周期结束日期上限（含）
    pub period_end_max: Option<NaiveDate>,
    /// 返回条数上限
    pub limit: Option<u64>,
}

impl ForecastQuery {
    /// 查询看板的全部预测
    pub fn for_board(board_id: Uuid) -> Self {
        Self {
            board_id,
            ..Default::default()
        }
    }

    /// 判断预测是否满足条件（不含 limit）
    pub fn matches(&self, forecast: &DemandForecast) -> bool {
        forecast.board_id == self.board_id
            && self.period_start.is_none_or(|d| forecast.period_start == d)
            && self.period_end.is_none_or(|d| forecast.period_end == d)
            && self.period_end_max.is_none_or(|d| forecast.period_end <= d)
    }
}

/// 预测仓库特质
///
/// 预测是只追加的日志，按 (看板, 资源, 周期) 划分，由 run_id 区分批次
#[async_trait]
pub trait ForecastRepository: Send + Sync {
    /// 批量写入一次运行产生的预测
    async fn create_many(&self, forecasts: &[DemandForecast]) -> Result<(), RepositoryError>;
    /// 按条件查询，按创建时间倒序，同一批次内按 run_position 正序
    async fn query(&self, query: ForecastQuery) -> Result<Vec<DemandForecast>, RepositoryError>;

    /// 最近一次运行的预测
    ///
    /// 取满足条件的最新一条预测的 run_id，返回该批次中满足条件的全部预测
    async fn latest_run(
        &self,
        query: ForecastQuery,
    ) -> Result<Vec<DemandForecast>, RepositoryError> {
        let mut forecasts = self.query(ForecastQuery { limit: None, ..query }).await?;
        let Some(run_id) = forecasts.first().map(|f| f.run_id) else {
            return Ok(Vec::new());
        };
        forecasts.retain(|f| f.run_id == run_id);
        forecasts.sort_by_key(|f| f.run_position);
        Ok(forecasts)
    }
}

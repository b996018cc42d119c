// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::alert::CapacityAlert;
use crate::domain::models::forecast::DemandForecast;
use crate::domain::repositories::board_repository::RepositoryError;
use async_trait::async_trait;

/// 一次运行对单条告警的写入
#[derive(Debug, Clone)]
pub enum AlertWrite {
    /// 新建告警
    Create(CapacityAlert),
    /// 刷新仍活跃的告警；写入时已不再活跃则新建 `fallback`
    Refresh {
        refreshed: CapacityAlert,
        fallback: CapacityAlert,
    },
}

impl AlertWrite {
    /// 新建时写入的告警
    pub fn fallback(&self) -> &CapacityAlert {
        match self {
            AlertWrite::Create(alert) => alert,
            AlertWrite::Refresh { fallback, .. } => fallback,
        }
    }
}

/// 运行记录器
///
/// 把一次预测运行的预测和告警作为整体持久化：要么全部写入，要么全部不写入
#[async_trait]
pub trait RunRecorder: Send + Sync {
    /// 写入一次运行，返回持久化后的告警
    async fn record_run(
        &self,
        forecasts: &[DemandForecast],
        alerts: &[AlertWrite],
    ) -> Result<Vec<CapacityAlert>, RepositoryError>;
}

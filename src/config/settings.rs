// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// 应用程序配置设置
///
/// 包含数据库、服务器、存储、指标和预测启发式参数等所有配置项
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 服务器配置
    pub server: ServerSettings,
    /// 存储配置
    pub storage: StorageSettings,
    /// 指标配置
    pub metrics: MetricsSettings,
    /// 预测启发式参数
    #[serde(default)]
    pub forecasting: ForecastSettings,
}

/// 数据库配置设置
#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

impl DatabaseSettings {
    /// 是否为内存 SQLite；每个连接都是一个独立的空库
    pub fn is_in_memory_sqlite(&self) -> bool {
        self.url.starts_with("sqlite:") && self.url.contains(":memory:")
    }
}

/// 服务器配置设置
#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 存储配置设置
#[derive(Debug, Deserialize)]
pub struct StorageSettings {
    /// 预测/告警/建议记录的存储后端 (database, memory)
    pub backend: String,
    /// 看板快照文件路径（JSON 或 YAML），作为内置的只读任务数据源
    pub board_snapshot_path: Option<String>,
}

/// 指标配置设置
#[derive(Debug, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用 Prometheus 导出
    pub enabled: bool,
    /// 导出监听地址
    pub listen_addr: String,
}

/// 可用容量模型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CapacityModel {
    /// 按成员档案中的每周工时计算；未配置时退回固定工作日模型
    #[default]
    ProfileHours,
    /// 固定工作日模型：每周工作日数 × 每日工时，忽略档案
    FixedWorkingDays,
}

/// 预测启发式参数
///
/// 所有启发式常量集中在这里，可通过配置调整或在测试中注入
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastSettings {
    /// 每个未完成任务的基础工时
    pub hours_per_task: f64,
    /// 每个 high/urgent 任务的额外工时
    pub priority_overhead_hours: f64,
    /// 趋势乘数（预计新增工作的缓冲）
    pub trend_multiplier: f64,
    /// 每周工作日数
    pub working_days_per_week: f64,
    /// 每个工作日工时
    pub hours_per_working_day: f64,
    /// 容量模型
    pub capacity_model: CapacityModel,
    /// 警告阈值（利用率百分比）
    pub warning_threshold_percent: f64,
    /// 严重阈值（利用率百分比）
    pub critical_threshold_percent: f64,
    /// 历史任务数低于该值时为低置信度
    pub medium_confidence_min_tasks: usize,
    /// 历史任务数达到该值时为高置信度
    pub high_confidence_min_tasks: usize,
    pub low_confidence: f64,
    pub medium_confidence: f64,
    pub high_confidence: f64,
    /// 默认预测周期（天）
    pub default_period_days: i64,
    /// 最短预测周期（天）
    pub min_period_days: i64,
    /// 最长预测周期（天）
    pub max_period_days: i64,
    /// 每个过载成员最多推迟的任务数
    pub max_defer_per_resource: usize,
    /// 每个过载成员最多的重新分配目标数
    pub max_reassign_targets: usize,
    /// 每条重新分配建议最多涉及的任务数
    pub max_reassign_tasks: usize,
    /// 判定为空闲成员所需的最小剩余工时
    pub underutilized_headroom_hours: f64,
    pub defer_savings_hours: f64,
    pub defer_confidence: f64,
    pub defer_priority: i32,
    pub reassign_savings_hours: f64,
    pub reassign_confidence: f64,
    pub reassign_priority: i32,
    /// 是否合并相同 (看板, 范围, 成员, 级别) 的活跃告警
    pub dedupe_active_alerts: bool,
    /// 是否为未分配的工作生成角色桶预测
    pub forecast_unassigned_work: bool,
    /// 单次运行超时时间（秒）
    pub run_timeout_secs: u64,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            hours_per_task: 8.0,
            priority_overhead_hours: 4.0,
            trend_multiplier: 1.2,
            working_days_per_week: 5.0,
            hours_per_working_day: 8.0,
            capacity_model: CapacityModel::ProfileHours,
            warning_threshold_percent: 80.0,
            critical_threshold_percent: 100.0,
            medium_confidence_min_tasks: 5,
            high_confidence_min_tasks: 15,
            low_confidence: 0.50,
            medium_confidence: 0.65,
            high_confidence: 0.85,
            default_period_days: 21,
            min_period_days: 7,
            max_period_days: 30,
            max_defer_per_resource: 3,
            max_reassign_targets: 2,
            max_reassign_tasks: 2,
            underutilized_headroom_hours: 5.0,
            defer_savings_hours: 2.0,
            defer_confidence: 0.85,
            defer_priority: 7,
            reassign_savings_hours: 5.0,
            reassign_confidence: 0.75,
            reassign_priority: 8,
            dedupe_active_alerts: true,
            forecast_unassigned_work: false,
            run_timeout_secs: 30,
        }
    }
}

impl ForecastSettings {
    /// 固定工作日模型下的每周容量
    pub fn standard_weekly_hours(&self) -> f64 {
        self.working_days_per_week * self.hours_per_working_day
    }

    /// 规范化预测周期
    ///
    /// 缺省或超出 [min, max] 范围时使用默认周期
    pub fn normalize_period(&self, days: Option<i64>) -> i64 {
        match days {
            Some(d) if (self.min_period_days..=self.max_period_days).contains(&d) => d,
            Some(d) => {
                tracing::warn!(
                    "Forecast period {} days outside [{}, {}], using default {}",
                    d,
                    self.min_period_days,
                    self.max_period_days,
                    self.default_period_days
                );
                self.default_period_days
            }
            None => self.default_period_days,
        }
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从配置文件和环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Default DB settings
            .set_default("database.url", "sqlite://capacityrs.db?mode=rwc")?
            .set_default("database.max_connections", 20)?
            .set_default("database.min_connections", 1)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            // Default Storage settings
            .set_default("storage.backend", "database")?
            // Default Metrics settings
            .set_default("metrics.enabled", true)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("CAPACITYRS").separator("__"));

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;

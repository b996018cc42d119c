// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 容量预测流水线的各个阶段：
/// - 负载估算（workload_estimator）：把已分配工作项换算成当前工时
/// - 预测计算（forecast_calculator）：可用容量、预计工作量和置信度
/// - 告警引擎（alert_engine）：个人和团队的阈值告警
/// - 推荐引擎（recommendation_engine）：推迟/重新分配建议
/// - 汇总报告（summary_reporter）：汇总统计和图表数据
/// - 工作量分析（workload_analyzer）：单个任务影响和负责人推荐
/// - 预测服务（forecasting_service）：编排以上阶段并持久化结果
pub mod alert_engine;
pub mod forecast_calculator;
pub mod forecasting_service;
pub mod recommendation_engine;
pub mod summary_reporter;
pub mod workload_analyzer;
pub mod workload_estimator;

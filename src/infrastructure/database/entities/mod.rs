// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据库实体模块
///
/// 预测引擎写入的三类记录：需求预测、容量告警和负载分配建议
pub mod capacity_alert;
pub mod demand_forecast;
pub mod distribution_recommendation;

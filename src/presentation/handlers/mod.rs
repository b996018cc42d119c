// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// HTTP请求处理器模块
///
/// 每个处理器负责解析请求、调用预测服务或生命周期用例并返回 JSON 响应
pub mod alert_handler;
pub mod forecast_handler;
pub mod recommendation_handler;

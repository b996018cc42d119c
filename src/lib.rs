// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 请求 DTO 以及告警和建议的生命周期用例
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含核心业务实体、预测流水线和仓库接口
pub mod domain;

/// 基础设施模块
///
/// 提供数据库、内存仓库、看板快照和指标等外部集成
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由和处理器
pub mod presentation;

/// 工具模块
pub mod utils;

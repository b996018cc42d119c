// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：工作项、预测、告警和建议
/// - 仓库接口（repositories）：看板只读端口和三类记录的持久化抽象
/// - 服务（services）：预测流水线和编排服务
///
/// 领域层不依赖于任何外部实现。
pub mod models;
pub mod repositories;
pub mod services;

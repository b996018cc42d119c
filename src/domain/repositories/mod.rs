// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 仓库接口定义了数据访问的抽象契约，具体实现由基础设施层提供。
///
/// 包含的仓库接口：
/// - 告警仓库（alert_repository）：管理容量告警的持久化
/// - 看板只读端口（board_repository）：读取看板、成员档案和工作项
/// - 预测仓库（forecast_repository）：只追加的需求预测日志
/// - 建议仓库（recommendation_repository）：管理再平衡建议
/// - 运行记录器（run_repository）：整体写入一次预测运行
///
/// 这些接口确保了预测引擎不依赖于具体的数据存储技术，
/// 可以在没有数据库的情况下测试。
pub mod alert_repository;
pub mod board_repository;
pub mod forecast_repository;
pub mod recommendation_repository;
pub mod run_repository;

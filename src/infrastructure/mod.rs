// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含系统的技术实现细节：
/// - 数据库（database）：连接池和 SeaORM 实体
/// - 可观测性（observability）：Prometheus 指标
/// - 仓库实现（repositories）：数据库、内存和快照文件实现
///
/// 基础设施层依赖于领域层的抽象接口，领域层不感知具体技术。
pub mod database;
pub mod observability;
pub mod repositories;

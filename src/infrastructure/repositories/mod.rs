// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库实现模块
///
/// 提供领域仓库接口的具体实现：
/// - 基于 SeaORM 的数据库实现（Postgres 或 SQLite），运行记录使用事务整体写入
/// - 内存实现，用于 `storage.backend = "memory"` 和测试
/// - 基于快照文件的看板只读数据源
pub mod alert_repo_impl;
pub mod forecast_repo_impl;
pub mod memory_repo_impl;
pub mod recommendation_repo_impl;
pub mod run_recorder_impl;
pub mod snapshot_board_source;

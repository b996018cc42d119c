// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::board::{Board, ResourceProfile};
use crate::domain::models::work_item::WorkItem;
use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
    /// 记录已被并发修改，状态与读取时不同
    #[error("Record was modified concurrently")]
    Conflict,
    /// 序列化错误
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// 外部数据源错误
    #[error("Data source error: {0}")]
    Source(String),
}

/// 看板只读端口
///
/// 引擎从外部任务/档案存储读取数据的唯一入口，只提供预测所需的形状
#[async_trait]
pub trait BoardReadPort: Send + Sync {
    /// 根据ID查找看板
    async fn find_board(&self, board_id: Uuid) -> Result<Option<Board>, RepositoryError>;
    /// 查找成员的容量档案；没有档案的成员不参与预测
    async fn find_profile(
        &self,
        resource_id: Uuid,
    ) -> Result<Option<ResourceProfile>, RepositoryError>;
    /// 成员在看板上被分配过的全部工作项（包括已完成的）
    async fn assigned_work_items(
        &self,
        board_id: Uuid,
        resource_id: Uuid,
    ) -> Result<Vec<WorkItem>, RepositoryError>;
    /// 看板上未分配的工作项
    async fn unassigned_work_items(&self, board_id: Uuid) -> Result<Vec<WorkItem>, RepositoryError>;
    /// 根据ID查找看板上的工作项
    async fn find_work_item(
        &self,
        board_id: Uuid,
        item_id: Uuid,
    ) -> Result<Option<WorkItem>, RepositoryError>;
}

/// 角色目录
///
/// 可选能力：部署环境提供了成员角色信息时注入，否则预测使用显示名称
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    /// 查询成员的角色/职位
    async fn role_of(&self, resource_id: Uuid) -> Result<Option<String>, RepositoryError>;
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::board::{Board, ResourceProfile};
use crate::domain::models::work_item::WorkItem;
use crate::domain::repositories::board_repository::{
    BoardReadPort, RepositoryError, RoleDirectory,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// 看板数据快照
///
/// 任务管理系统导出的只读数据：看板、成员容量档案、工作项以及可选的角色表
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardSnapshot {
    #[serde(default)]
    pub boards: Vec<Board>,
    #[serde(default)]
    pub profiles: Vec<ResourceProfile>,
    #[serde(default)]
    pub work_items: Vec<WorkItem>,
    #[serde(default)]
    pub roles: HashMap<Uuid, String>,
}

/// 基于快照的看板数据源
///
/// 从 JSON 或 YAML 文件加载，也可在测试中逐项添加数据
#[derive(Debug, Clone, Default)]
pub struct SnapshotBoardSource {
    snapshot: Arc<RwLock<BoardSnapshot>>,
}

impl SnapshotBoardSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: BoardSnapshot) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(snapshot)),
        }
    }

    /// 从文件加载快照
    ///
    /// 扩展名为 `yaml`/`yml` 时按 YAML 解析，否则按 JSON 解析
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| RepositoryError::Source(format!("{}: {}", path.display(), e)))?;

        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml") | Some("yml")
        );
        let snapshot: BoardSnapshot = if is_yaml {
            serde_yaml::from_str(&content)
                .map_err(|e| RepositoryError::Source(format!("{}: {}", path.display(), e)))?
        } else {
            serde_json::from_str(&content)?
        };

        info!(
            "Loaded board snapshot from {}: {} boards, {} profiles, {} work items",
            path.display(),
            snapshot.boards.len(),
            snapshot.profiles.len(),
            snapshot.work_items.len()
        );
        Ok(Self::from_snapshot(snapshot))
    }

    pub async fn add_board(&self, board: Board) {
        self.snapshot.write().await.boards.push(board);
    }

    pub async fn add_profile(&self, profile: ResourceProfile) {
        self.snapshot.write().await.profiles.push(profile);
    }

    pub async fn add_work_item(&self, item: WorkItem) {
        self.snapshot.write().await.work_items.push(item);
    }

    pub async fn set_role(&self, resource_id: Uuid, role: impl Into<String>) {
        self.snapshot
            .write()
            .await
            .roles
            .insert(resource_id, role.into());
    }
}

#[async_trait]
impl BoardReadPort for SnapshotBoardSource {
    async fn find_board(&self, board_id: Uuid) -> Result<Option<Board>, RepositoryError> {
        let snapshot = self.snapshot.read().await;
        Ok(snapshot.boards.iter().find(|b| b.id == board_id).cloned())
    }

    async fn find_profile(
        &self,
        resource_id: Uuid,
    ) -> Result<Option<ResourceProfile>, RepositoryError> {
        let snapshot = self.snapshot.read().await;
        Ok(snapshot
            .profiles
            .iter()
            .find(|p| p.resource_id == resource_id)
            .cloned())
    }

    async fn assigned_work_items(
        &self,
        board_id: Uuid,
        resource_id: Uuid,
    ) -> Result<Vec<WorkItem>, RepositoryError> {
        let snapshot = self.snapshot.read().await;
        Ok(snapshot
            .work_items
            .iter()
            .filter(|item| item.board_id == board_id && item.assignee == Some(resource_id))
            .cloned()
            .collect())
    }

    async fn unassigned_work_items(&self, board_id: Uuid) -> Result<Vec<WorkItem>, RepositoryError> {
        let snapshot = self.snapshot.read().await;
        Ok(snapshot
            .work_items
            .iter()
            .filter(|item| item.board_id == board_id && item.assignee.is_none())
            .cloned()
            .collect())
    }

    async fn find_work_item(
        &self,
        board_id: Uuid,
        item_id: Uuid,
    ) -> Result<Option<WorkItem>, RepositoryError> {
        let snapshot = self.snapshot.read().await;
        Ok(snapshot
            .work_items
            .iter()
            .find(|item| item.board_id == board_id && item.id == item_id)
            .cloned())
    }
}

#[async_trait]
impl RoleDirectory for SnapshotBoardSource {
    async fn role_of(&self, resource_id: Uuid) -> Result<Option<String>, RepositoryError> {
        Ok(self.snapshot.read().await.roles.get(&resource_id).cloned())
    }
}

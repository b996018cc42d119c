// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 看板
///
/// 由外部任务存储维护，引擎只需要它的身份和成员列表。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    /// 看板唯一标识符
    pub id: Uuid,
    /// 看板名称
    pub name: String,
    /// 看板成员（资源）ID列表
    #[serde(default)]
    pub members: Vec<Uuid>,
}

impl Board {
    pub fn new(name: impl Into<String>, members: Vec<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            members,
        }
    }
}

/// 资源容量档案
///
/// 由身份/档案子系统维护，只读
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceProfile {
    /// 资源（成员）ID
    pub resource_id: Uuid,
    /// 显示名称
    pub display_name: String,
    /// 每周容量工时；未配置时由容量模型决定默认值
    #[serde(default)]
    pub weekly_capacity_hours: Option<f64>,
}

impl ResourceProfile {
    pub fn new(resource_id: Uuid, display_name: impl Into<String>, weekly_capacity_hours: f64) -> Self {
        Self {
            resource_id,
            display_name: display_name.into(),
            weekly_capacity_hours: Some(weekly_capacity_hours),
        }
    }
}

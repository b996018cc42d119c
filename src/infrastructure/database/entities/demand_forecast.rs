// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;
use uuid::Uuid;

/// 需求预测记录
///
/// 预测对象拆成 `target_kind` + `target_person` / `target_role` 三列存储
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "demand_forecasts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub run_id: Uuid,
    pub run_position: i32,
    pub board_id: Uuid,
    pub target_kind: String,
    pub target_person: Option<Uuid>,
    pub target_role: Option<String>,
    pub role_label: Option<String>,
    pub period_start: Date,
    pub period_end: Date,
    pub predicted_workload_hours: f64,
    pub available_capacity_hours: f64,
    pub confidence_score: f64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;
use uuid::Uuid;

/// 负载分配建议记录
///
/// 涉及的工作项和成员以 JSON 数组存储
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "distribution_recommendations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub board_id: Uuid,
    pub forecast_id: Uuid,
    pub recommendation_type: String,
    pub priority: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub expected_capacity_savings_hours: f64,
    pub confidence_score: f64,
    pub status: String,
    pub affected_tasks: Json,
    pub affected_users: Json,
    #[sea_orm(column_type = "Text", nullable)]
    pub implementation_note: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub implemented_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "capacity_alerts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub board_id: Uuid,
    pub forecast_id: Option<Uuid>,
    pub alert_type: String,
    pub alert_level: String,
    pub status: String,
    pub resource_id: Option<Uuid>,
    pub period_start: Option<Date>,
    pub period_end: Option<Date>,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub workload_percentage: i32,
    pub acknowledged_by: Option<Uuid>,
    pub acknowledged_at: Option<DateTimeWithTimeZone>,
    pub resolved_by: Option<Uuid>,
    pub resolved_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

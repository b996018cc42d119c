// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

/// 容量预测、告警和分配建议三张表
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    /// 应用数据库迁移
    ///
    /// # 参数
    ///
    /// * `manager` - 数据库模式管理器
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 迁移成功
    /// * `Err(DbErr)` - 迁移失败
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. Forecasts, append-only
        manager
            .create_table(
                Table::create()
                    .table(DemandForecasts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DemandForecasts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DemandForecasts::RunId).uuid().not_null())
                    .col(
                        ColumnDef::new(DemandForecasts::RunPosition)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(DemandForecasts::BoardId).uuid().not_null())
                    .col(
                        ColumnDef::new(DemandForecasts::TargetKind)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DemandForecasts::TargetPerson).uuid().null())
                    .col(ColumnDef::new(DemandForecasts::TargetRole).string().null())
                    .col(ColumnDef::new(DemandForecasts::RoleLabel).string().null())
                    .col(ColumnDef::new(DemandForecasts::PeriodStart).date().not_null())
                    .col(ColumnDef::new(DemandForecasts::PeriodEnd).date().not_null())
                    .col(
                        ColumnDef::new(DemandForecasts::PredictedWorkloadHours)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DemandForecasts::AvailableCapacityHours)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DemandForecasts::ConfidenceScore)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DemandForecasts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_demand_forecasts_board_period")
                    .table(DemandForecasts::Table)
                    .col(DemandForecasts::BoardId)
                    .col(DemandForecasts::PeriodStart)
                    .col(DemandForecasts::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // 2. Alerts
        manager
            .create_table(
                Table::create()
                    .table(CapacityAlerts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CapacityAlerts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CapacityAlerts::BoardId).uuid().not_null())
                    .col(ColumnDef::new(CapacityAlerts::ForecastId).uuid().null())
                    .col(ColumnDef::new(CapacityAlerts::AlertType).string().not_null())
                    .col(ColumnDef::new(CapacityAlerts::AlertLevel).string().not_null())
                    .col(
                        ColumnDef::new(CapacityAlerts::Status)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(CapacityAlerts::ResourceId).uuid().null())
                    .col(ColumnDef::new(CapacityAlerts::PeriodStart).date().null())
                    .col(ColumnDef::new(CapacityAlerts::PeriodEnd).date().null())
                    .col(ColumnDef::new(CapacityAlerts::Message).text().not_null())
                    .col(
                        ColumnDef::new(CapacityAlerts::WorkloadPercentage)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CapacityAlerts::AcknowledgedBy).uuid().null())
                    .col(
                        ColumnDef::new(CapacityAlerts::AcknowledgedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(CapacityAlerts::ResolvedBy).uuid().null())
                    .col(
                        ColumnDef::new(CapacityAlerts::ResolvedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CapacityAlerts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(CapacityAlerts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_capacity_alerts_board_status")
                    .table(CapacityAlerts::Table)
                    .col(CapacityAlerts::BoardId)
                    .col(CapacityAlerts::Status)
                    .col(CapacityAlerts::PeriodStart)
                    .to_owned(),
            )
            .await?;

        // 3. Recommendations
        manager
            .create_table(
                Table::create()
                    .table(DistributionRecommendations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DistributionRecommendations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DistributionRecommendations::BoardId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DistributionRecommendations::ForecastId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DistributionRecommendations::RecommendationType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DistributionRecommendations::Priority)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DistributionRecommendations::Title)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DistributionRecommendations::Description)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DistributionRecommendations::ExpectedCapacitySavingsHours)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DistributionRecommendations::ConfidenceScore)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DistributionRecommendations::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(DistributionRecommendations::AffectedTasks)
                            .json()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DistributionRecommendations::AffectedUsers)
                            .json()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DistributionRecommendations::ImplementationNote)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(DistributionRecommendations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(DistributionRecommendations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(DistributionRecommendations::ImplementedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_distribution_recommendations_board_status")
                    .table(DistributionRecommendations::Table)
                    .col(DistributionRecommendations::BoardId)
                    .col(DistributionRecommendations::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(DistributionRecommendations::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CapacityAlerts::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(DemandForecasts::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum DemandForecasts {
    Table,
    Id,
    RunId,
    RunPosition,
    BoardId,
    TargetKind,
    TargetPerson,
    TargetRole,
    RoleLabel,
    PeriodStart,
    PeriodEnd,
    PredictedWorkloadHours,
    AvailableCapacityHours,
    ConfidenceScore,
    CreatedAt,
}

#[derive(DeriveIden)]
enum CapacityAlerts {
    Table,
    Id,
    BoardId,
    ForecastId,
    AlertType,
    AlertLevel,
    Status,
    ResourceId,
    PeriodStart,
    PeriodEnd,
    Message,
    WorkloadPercentage,
    AcknowledgedBy,
    AcknowledgedAt,
    ResolvedBy,
    ResolvedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum DistributionRecommendations {
    Table,
    Id,
    BoardId,
    ForecastId,
    RecommendationType,
    Priority,
    Title,
    Description,
    ExpectedCapacitySavingsHours,
    ConfidenceScore,
    Status,
    AffectedTasks,
    AffectedUsers,
    ImplementationNote,
    CreatedAt,
    UpdatedAt,
    ImplementedAt,
}

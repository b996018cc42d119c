// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum_test::TestServer;
use capacityrs::config::settings::{DatabaseSettings, ForecastSettings};
use capacityrs::domain::models::board::{Board, ResourceProfile};
use capacityrs::domain::models::work_item::{Priority, WorkItem};
use capacityrs::domain::repositories::alert_repository::AlertRepository;
use capacityrs::domain::repositories::recommendation_repository::RecommendationRepository;
use capacityrs::domain::services::forecasting_service::ForecastingService;
use capacityrs::infrastructure::database::connection;
use capacityrs::infrastructure::repositories::alert_repo_impl::AlertRepositoryImpl;
use capacityrs::infrastructure::repositories::forecast_repo_impl::ForecastRepositoryImpl;
use capacityrs::infrastructure::repositories::recommendation_repo_impl::RecommendationRepositoryImpl;
use capacityrs::infrastructure::repositories::run_recorder_impl::RunRecorderImpl;
use capacityrs::infrastructure::repositories::snapshot_board_source::SnapshotBoardSource;
use capacityrs::presentation::routes;
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub db: Arc<DatabaseConnection>,
    pub source: Arc<SnapshotBoardSource>,
}

/// 内存 SQLite 并执行迁移
pub async fn create_test_db() -> Arc<DatabaseConnection> {
    let settings = DatabaseSettings {
        url: "sqlite::memory:".to_string(),
        max_connections: None,
        min_connections: None,
        connect_timeout: None,
        idle_timeout: None,
    };
    let db = Arc::new(
        connection::create_pool(&settings)
            .await
            .expect("Failed to connect to sqlite"),
    );
    Migrator::up(db.as_ref(), None)
        .await
        .expect("Failed to run migrations");
    db
}

pub async fn create_test_app() -> TestApp {
    create_test_app_with_settings(ForecastSettings::default()).await
}

pub async fn create_test_app_with_settings(settings: ForecastSettings) -> TestApp {
    let db = create_test_db().await;
    let source = Arc::new(SnapshotBoardSource::new());
    let alert_repo: Arc<dyn AlertRepository> = Arc::new(AlertRepositoryImpl::new(db.clone()));
    let recommendation_repo: Arc<dyn RecommendationRepository> =
        Arc::new(RecommendationRepositoryImpl::new(db.clone()));

    let service = Arc::new(
        ForecastingService::new(
            source.clone(),
            Arc::new(ForecastRepositoryImpl::new(db.clone())),
            alert_repo.clone(),
            recommendation_repo.clone(),
            settings,
        )
        .with_role_directory(source.clone())
        .with_run_recorder(Arc::new(RunRecorderImpl::new(db.clone()))),
    );

    let app = routes::app(service, alert_repo, recommendation_repo);
    let server = TestServer::new(app).expect("Failed to create test server");

    TestApp { server, db, source }
}

/// 看板成员
#[allow(dead_code)]
pub struct Team {
    pub board_id: Uuid,
    pub bob: Uuid,
    pub carol: Uuid,
}

/// Bob（每周 20h）过载，Carol（每周 40h）空闲
///
/// Bob 有 6 个 medium、2 个 high 和 2 个 low 工作项，Carol 只有一个 8h 的任务
pub async fn seed_overloaded_team(source: &SnapshotBoardSource) -> Team {
    let bob = Uuid::new_v4();
    let carol = Uuid::new_v4();
    let board = Board::new("Platform", vec![bob, carol]);
    let board_id = board.id;

    source.add_board(board).await;
    source.add_profile(ResourceProfile::new(bob, "Bob", 20.0)).await;
    source
        .add_profile(ResourceProfile::new(carol, "Carol", 40.0))
        .await;
    source.set_role(bob, "Frontend").await;

    for i in 0..6 {
        source
            .add_work_item(
                WorkItem::new(board_id, format!("feature-{}", i), Priority::Medium).assigned_to(bob),
            )
            .await;
    }
    for i in 0..2 {
        source
            .add_work_item(
                WorkItem::new(board_id, format!("bug-{}", i), Priority::High).assigned_to(bob),
            )
            .await;
        source
            .add_work_item(
                WorkItem::new(board_id, format!("polish-{}", i), Priority::Low).assigned_to(bob),
            )
            .await;
    }
    source
        .add_work_item(WorkItem::new(board_id, "review", Priority::Medium).assigned_to(carol))
        .await;

    Team {
        board_id,
        bob,
        carol,
    }
}

// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use capacityrs::config::settings::Settings;
use capacityrs::domain::repositories::alert_repository::AlertRepository;
use capacityrs::domain::repositories::forecast_repository::ForecastRepository;
use capacityrs::domain::repositories::recommendation_repository::RecommendationRepository;
use capacityrs::domain::repositories::run_repository::RunRecorder;
use capacityrs::domain::services::forecasting_service::ForecastingService;
use capacityrs::infrastructure::database::connection;
use capacityrs::infrastructure::observability::metrics::init_metrics;
use capacityrs::infrastructure::repositories::alert_repo_impl::AlertRepositoryImpl;
use capacityrs::infrastructure::repositories::forecast_repo_impl::ForecastRepositoryImpl;
use capacityrs::infrastructure::repositories::memory_repo_impl::{
    InMemoryAlertRepository, InMemoryForecastRepository, InMemoryRecommendationRepository,
};
use capacityrs::infrastructure::repositories::recommendation_repo_impl::RecommendationRepositoryImpl;
use capacityrs::infrastructure::repositories::run_recorder_impl::RunRecorderImpl;
use capacityrs::infrastructure::repositories::snapshot_board_source::SnapshotBoardSource;
use capacityrs::presentation::routes;
use capacityrs::utils::telemetry;
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting capacityrs...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    init_metrics(&settings.metrics);

    // 3. Storage backend
    let (forecast_repo, alert_repo, recommendation_repo, run_recorder): (
        Arc<dyn ForecastRepository>,
        Arc<dyn AlertRepository>,
        Arc<dyn RecommendationRepository>,
        Option<Arc<dyn RunRecorder>>,
    ) = match settings.storage.backend.as_str() {
        "memory" => {
            info!("Using in-memory storage");
            (
                Arc::new(InMemoryForecastRepository::new()),
                Arc::new(InMemoryAlertRepository::new()),
                Arc::new(InMemoryRecommendationRepository::new()),
                None,
            )
        }
        other => {
            if other != "database" {
                warn!("Unknown storage backend '{}', using database", other);
            }
            let db = Arc::new(connection::create_pool(&settings.database).await?);
            info!("Database connection established");

            info!("Running database migrations...");
            Migrator::up(db.as_ref(), None).await?;
            info!("Database migrations applied");

            (
                Arc::new(ForecastRepositoryImpl::new(db.clone())),
                Arc::new(AlertRepositoryImpl::new(db.clone())),
                Arc::new(RecommendationRepositoryImpl::new(db.clone())),
                Some(Arc::new(RunRecorderImpl::new(db)) as Arc<dyn RunRecorder>),
            )
        }
    };

    // 4. Board data
    let board_source = match &settings.storage.board_snapshot_path {
        Some(path) => Arc::new(SnapshotBoardSource::load(path).await?),
        None => {
            warn!("No board snapshot configured, starting with an empty board source");
            Arc::new(SnapshotBoardSource::new())
        }
    };

    // 5. Forecasting service
    let mut service = ForecastingService::new(
        board_source.clone(),
        forecast_repo,
        alert_repo.clone(),
        recommendation_repo.clone(),
        settings.forecasting.clone(),
    )
    .with_role_directory(board_source);
    if let Some(recorder) = run_recorder {
        service = service.with_run_recorder(recorder);
    }
    let service = Arc::new(service);

    let app = routes::app(service, alert_repo, recommendation_repo);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

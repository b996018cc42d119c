// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_db;
use capacityrs::domain::models::alert::{AlertLevel, AlertStatus, AlertType, CapacityAlert};
use capacityrs::domain::models::forecast::{DemandForecast, ResourceTarget};
use capacityrs::domain::models::recommendation::{
    DistributionRecommendation, RecommendationStatus, RecommendationType,
};
use capacityrs::domain::repositories::alert_repository::{ActiveAlertKey, AlertRepository};
use capacityrs::domain::repositories::board_repository::RepositoryError;
use capacityrs::domain::repositories::forecast_repository::{ForecastQuery, ForecastRepository};
use capacityrs::domain::repositories::recommendation_repository::RecommendationRepository;
use capacityrs::domain::repositories::run_repository::{AlertWrite, RunRecorder};
use capacityrs::infrastructure::repositories::alert_repo_impl::AlertRepositoryImpl;
use capacityrs::infrastructure::repositories::forecast_repo_impl::ForecastRepositoryImpl;
use capacityrs::infrastructure::repositories::recommendation_repo_impl::RecommendationRepositoryImpl;
use capacityrs::infrastructure::repositories::run_recorder_impl::RunRecorderImpl;
use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

fn forecast(
    board_id: Uuid,
    run_id: Uuid,
    position: i32,
    target: ResourceTarget,
    period_start: NaiveDate,
) -> DemandForecast {
    DemandForecast {
        id: Uuid::new_v4(),
        run_id,
        run_position: position,
        board_id,
        target,
        role_label: Some("Backend".to_string()),
        period_start,
        period_end: period_start + Duration::days(21),
        predicted_workload_hours: 33.6,
        available_capacity_hours: 120.0,
        confidence_score: 0.5,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_forecast_runs_are_appended_and_latest_run_wins() {
    let db = create_test_db().await;
    let repo = ForecastRepositoryImpl::new(db);
    let board_id = Uuid::new_v4();
    let start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    let alice = Uuid::new_v4();

    let first_run = Uuid::new_v4();
    repo.create_many(&[
        forecast(board_id, first_run, 0, ResourceTarget::Person(alice), start),
        forecast(board_id, first_run, 1, ResourceTarget::Role("unassigned".into()), start),
    ])
    .await
    .unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second_run = Uuid::new_v4();
    repo.create_many(&[forecast(
        board_id,
        second_run,
        0,
        ResourceTarget::Person(alice),
        start,
    )])
    .await
    .unwrap();

    let all = repo.query(ForecastQuery::for_board(board_id)).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].run_id, second_run);

    let latest = repo
        .latest_run(ForecastQuery {
            period_start: Some(start),
            ..ForecastQuery::for_board(board_id)
        })
        .await
        .unwrap();
    assert_eq!(latest.len(), 1);
    assert_eq!(latest[0].run_id, second_run);
    assert_eq!(latest[0].target, ResourceTarget::Person(alice));

    let limited = repo
        .query(ForecastQuery {
            limit: Some(2),
            ..ForecastQuery::for_board(board_id)
        })
        .await
        .unwrap();
    assert_eq!(limited.len(), 2);

    let role = all
        .iter()
        .find(|f| f.target == ResourceTarget::Role("unassigned".into()))
        .unwrap();
    assert_eq!(role.run_position, 1);
}

#[tokio::test]
async fn test_forecast_query_filters_period() {
    let db = create_test_db().await;
    let repo = ForecastRepositoryImpl::new(db);
    let board_id = Uuid::new_v4();
    let start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();

    repo.create_many(&[
        forecast(board_id, Uuid::new_v4(), 0, ResourceTarget::Person(Uuid::new_v4()), start),
        forecast(
            board_id,
            Uuid::new_v4(),
            0,
            ResourceTarget::Person(Uuid::new_v4()),
            start + Duration::days(1),
        ),
    ])
    .await
    .unwrap();

    let matched = repo
        .query(ForecastQuery {
            period_end_max: Some(start + Duration::days(21)),
            ..ForecastQuery::for_board(board_id)
        })
        .await
        .unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].period_start, start);

    assert!(repo
        .query(ForecastQuery::for_board(Uuid::new_v4()))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_alert_find_active_and_update() {
    let db = create_test_db().await;
    let repo = AlertRepositoryImpl::new(db);
    let board_id = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    let sprint_end = start + Duration::days(21);

    let individual = CapacityAlert::new(
        board_id,
        AlertType::Individual,
        AlertLevel::Critical,
        "Bob is critically overloaded (144% capacity)".to_string(),
        144,
    )
    .for_forecast(Uuid::new_v4(), Some(bob))
    .for_period(start, sprint_end);
    let team = CapacityAlert::new(
        board_id,
        AlertType::Team,
        AlertLevel::Warning,
        "Team capacity is approaching limit (85% utilization)".to_string(),
        85,
    )
    .for_period(start, sprint_end);
    repo.create(&individual).await.unwrap();
    repo.create(&team).await.unwrap();

    let individual_key = ActiveAlertKey::of(&individual);
    let found = repo.find_active(&individual_key).await.unwrap().unwrap();
    assert_eq!(found.id, individual.id);
    assert_eq!(found.resource_id, Some(bob));
    assert_eq!(found.period_end, Some(sprint_end));

    let found_team = repo
        .find_active(&ActiveAlertKey::of(&team))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found_team.id, team.id);

    let week_key = ActiveAlertKey {
        period_end: Some(start + Duration::days(7)),
        ..individual_key.clone()
    };
    assert!(repo.find_active(&week_key).await.unwrap().is_none());

    let resolved = found.clone().resolve(bob).unwrap();
    repo.update_if_status(&resolved, AlertStatus::Active)
        .await
        .unwrap();
    assert!(repo.find_active(&individual_key).await.unwrap().is_none());

    let stale = found.acknowledge(bob).unwrap();
    assert!(matches!(
        repo.update_if_status(&stale, AlertStatus::Active).await,
        Err(RepositoryError::Conflict)
    ));
    let unknown = CapacityAlert::new(
        board_id,
        AlertType::Team,
        AlertLevel::Warning,
        String::new(),
        80,
    );
    assert!(matches!(
        repo.update_if_status(&unknown, AlertStatus::Active).await,
        Err(RepositoryError::NotFound)
    ));

    let active = repo
        .list_by_board(board_id, &[AlertStatus::Active])
        .await
        .unwrap();
    assert_eq!(active.len(), 1);
    let all = repo.list_by_board(board_id, &[]).await.unwrap();
    assert_eq!(all.len(), 2);

    let stored = repo.find_by_id(individual.id).await.unwrap().unwrap();
    assert_eq!(stored.status, AlertStatus::Resolved);
    assert_eq!(stored.resolved_by, Some(bob));
    assert!(stored.acknowledged_by.is_none());
}

#[tokio::test]
async fn test_run_recorder_writes_forecasts_and_alerts_together() {
    let db = create_test_db().await;
    let recorder = RunRecorderImpl::new(db.clone());
    let forecasts = ForecastRepositoryImpl::new(db.clone());
    let alerts = AlertRepositoryImpl::new(db);
    let board_id = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();

    let first = forecast(board_id, Uuid::new_v4(), 0, ResourceTarget::Person(bob), start);
    let alert = CapacityAlert::new(
        board_id,
        AlertType::Individual,
        AlertLevel::Critical,
        "Bob is critically overloaded (144% capacity)".to_string(),
        144,
    )
    .for_forecast(first.id, Some(bob))
    .for_period(first.period_start, first.period_end);

    let persisted = recorder
        .record_run(std::slice::from_ref(&first), &[AlertWrite::Create(alert.clone())])
        .await
        .unwrap();
    assert_eq!(persisted.len(), 1);

    // 第二次运行：刷新已有告警，但重复的告警ID使写入失败，整次运行回滚
    let second = forecast(board_id, Uuid::new_v4(), 0, ResourceTarget::Person(bob), start);
    let refreshed = alert.clone().refresh_from(
        &alert.clone().for_forecast(second.id, Some(bob)),
    );
    let duplicate = alert.clone();
    let result = recorder
        .record_run(
            std::slice::from_ref(&second),
            &[
                AlertWrite::Refresh {
                    refreshed,
                    fallback: alert.clone(),
                },
                AlertWrite::Create(duplicate),
            ],
        )
        .await;
    assert!(result.is_err());

    let latest = forecasts
        .latest_run(ForecastQuery::for_board(board_id))
        .await
        .unwrap();
    assert_eq!(latest.len(), 1);
    assert_eq!(latest[0].run_id, first.run_id);
    let stored = alerts.find_by_id(alert.id).await.unwrap().unwrap();
    assert_eq!(stored.forecast_id, Some(first.id));
}

#[tokio::test]
async fn test_run_recorder_replaces_alert_that_left_active() {
    let db = create_test_db().await;
    let recorder = RunRecorderImpl::new(db.clone());
    let alerts = AlertRepositoryImpl::new(db);
    let board_id = Uuid::new_v4();
    let bob = Uuid::new_v4();

    let existing = CapacityAlert::new(
        board_id,
        AlertType::Individual,
        AlertLevel::Warning,
        "Bob is near capacity (85%)".to_string(),
        85,
    )
    .for_forecast(Uuid::new_v4(), Some(bob));
    alerts.create(&existing).await.unwrap();
    alerts
        .update_if_status(&existing.clone().acknowledge(bob).unwrap(), AlertStatus::Active)
        .await
        .unwrap();

    let candidate = CapacityAlert::new(
        board_id,
        AlertType::Individual,
        AlertLevel::Warning,
        "Bob is near capacity (90%)".to_string(),
        90,
    )
    .for_forecast(Uuid::new_v4(), Some(bob));
    let persisted = recorder
        .record_run(
            &[],
            &[AlertWrite::Refresh {
                refreshed: existing.clone().refresh_from(&candidate),
                fallback: candidate.clone(),
            }],
        )
        .await
        .unwrap();

    assert_eq!(persisted[0].id, candidate.id);
    let stored = alerts.find_by_id(existing.id).await.unwrap().unwrap();
    assert_eq!(stored.status, AlertStatus::Acknowledged);
    assert_eq!(stored.workload_percentage, 85);
}

#[tokio::test]
async fn test_recommendation_round_trip_and_status_filter() {
    let db = create_test_db().await;
    let repo = RecommendationRepositoryImpl::new(db);
    let board_id = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let carol = Uuid::new_v4();

    let mut reassign = DistributionRecommendation::new(
        board_id,
        Uuid::new_v4(),
        RecommendationType::Reassign,
        8,
        "Reassign to Carol".to_string(),
        "Reassign tasks from Bob to Carol.".to_string(),
        5.0,
        0.75,
    );
    reassign.affected_tasks = vec![Uuid::new_v4(), Uuid::new_v4()];
    reassign.affected_users = vec![bob, carol];
    let defer = DistributionRecommendation::new(
        board_id,
        Uuid::new_v4(),
        RecommendationType::Defer,
        7,
        "Defer: polish".to_string(),
        "Defer task 'polish'".to_string(),
        2.0,
        0.85,
    );
    repo.create(&reassign).await.unwrap();
    repo.create(&defer).await.unwrap();

    let stored = repo.find_by_id(reassign.id).await.unwrap().unwrap();
    assert_eq!(stored.affected_users, vec![bob, carol]);
    assert_eq!(stored.affected_tasks, reassign.affected_tasks);
    assert_eq!(stored.recommendation_type, RecommendationType::Reassign);

    let listed = repo.list_by_board(board_id, None).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, defer.id);

    let implemented = stored.implement(Some("done".to_string())).unwrap();
    repo.update_if_status(&implemented, RecommendationStatus::Pending)
        .await
        .unwrap();
    assert!(matches!(
        repo.update_if_status(&implemented, RecommendationStatus::Pending)
            .await,
        Err(RepositoryError::Conflict)
    ));

    let pending = repo
        .list_by_board(board_id, Some(RecommendationStatus::Pending))
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, defer.id);

    let done = repo.find_by_id(reassign.id).await.unwrap().unwrap();
    assert_eq!(done.status, RecommendationStatus::Implemented);
    assert_eq!(done.implementation_note.as_deref(), Some("done"));
}

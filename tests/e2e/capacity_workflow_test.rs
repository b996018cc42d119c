// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 端到端流程：预测 → 告警 → 建议 → 处理建议 → 再次预测

use crate::integration::helpers::{create_test_app, create_test_app_with_settings, seed_overloaded_team};
use axum::http::StatusCode;
use capacityrs::config::settings::ForecastSettings;
use capacityrs::domain::models::work_item::{Priority, WorkItem};
use serde_json::{json, Value};

#[tokio::test]
async fn test_overloaded_team_workflow() {
    let app = create_test_app().await;
    let team = seed_overloaded_team(&app.source).await;
    let board = team.board_id;

    // 1. Forecast
    let first: Value = app
        .server
        .post(&format!("/v1/boards/{}/forecasts", board))
        .json(&json!({ "days_ahead": 21 }))
        .await
        .json();
    assert_eq!(first["alerts"].as_array().unwrap().len(), 1);

    // 2. Recommendations: two defers for Bob's low items, one reassign to Carol
    let response = app
        .server
        .post(&format!("/v1/boards/{}/recommendations", board))
        .json(&json!({ "period_days": 21 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let recs: Value = response.json();
    let recs = recs.as_array().unwrap();
    assert_eq!(recs.len(), 3);
    assert_eq!(recs[0]["recommendation_type"], "defer");
    assert_eq!(recs[1]["recommendation_type"], "defer");
    assert_eq!(recs[2]["recommendation_type"], "reassign");
    assert_eq!(recs[2]["title"], "Reassign to Carol");
    assert_eq!(
        recs[2]["affected_users"],
        json!([team.bob.to_string(), team.carol.to_string()])
    );
    assert_eq!(recs[2]["affected_tasks"].as_array().unwrap().len(), 2);
    assert!(recs[0]["title"].as_str().unwrap().starts_with("Defer: polish-"));

    // 3. Accept and implement the reassign, reject one defer
    let reassign_id = recs[2]["id"].as_str().unwrap();
    let accepted = app
        .server
        .post(&format!("/v1/recommendations/{}/accept", reassign_id))
        .await;
    assert_eq!(accepted.status_code(), StatusCode::OK);
    let implemented: Value = app
        .server
        .post(&format!("/v1/recommendations/{}/implement", reassign_id))
        .json(&json!({ "note": "moved two tickets to Carol" }))
        .await
        .json();
    assert_eq!(implemented["status"], "implemented");
    assert_eq!(implemented["implementation_note"], "moved two tickets to Carol");

    let defer_id = recs[0]["id"].as_str().unwrap();
    app.server
        .post(&format!("/v1/recommendations/{}/reject", defer_id))
        .await;
    let rejected_again = app
        .server
        .post(&format!("/v1/recommendations/{}/accept", defer_id))
        .await;
    assert_eq!(rejected_again.status_code(), StatusCode::CONFLICT);

    let pending: Value = app
        .server
        .get(&format!("/v1/boards/{}/recommendations", board))
        .add_query_param("status", "pending")
        .await
        .json();
    assert_eq!(pending.as_array().unwrap().len(), 1);

    // 4. Re-run refreshes the same active alert instead of duplicating it
    let second: Value = app
        .server
        .post(&format!("/v1/boards/{}/forecasts", board))
        .json(&json!({ "days_ahead": 21 }))
        .await
        .json();
    assert_ne!(first["run_id"], second["run_id"]);
    assert_eq!(first["alerts"][0]["id"], second["alerts"][0]["id"]);

    let alerts: Value = app
        .server
        .get(&format!("/v1/boards/{}/alerts", board))
        .await
        .json();
    assert_eq!(alerts.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_recommendations_before_first_forecast_are_empty() {
    let app = create_test_app().await;
    let team = seed_overloaded_team(&app.source).await;
    let board = team.board_id;

    let response = app
        .server
        .post(&format!("/v1/boards/{}/recommendations", board))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let recs: Value = response.json();
    assert!(recs.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unassigned_bucket_counts_toward_team() {
    let app = create_test_app_with_settings(ForecastSettings {
        forecast_unassigned_work: true,
        ..Default::default()
    })
    .await;
    let team = seed_overloaded_team(&app.source).await;
    for i in 0..3 {
        app.source
            .add_work_item(WorkItem::new(team.board_id, format!("triage-{}", i), Priority::Low))
            .await;
    }

    let run: Value = app
        .server
        .post(&format!("/v1/boards/{}/forecasts", team.board_id))
        .await
        .json();

    let forecasts = run["forecasts"].as_array().unwrap();
    assert_eq!(forecasts.len(), 3);
    let bucket = &forecasts[2];
    assert_eq!(bucket["role_label"], "Unassigned work");
    assert_eq!(bucket["available_capacity_hours"].as_f64().unwrap(), 0.0);
    assert!((bucket["predicted_workload_hours"].as_f64().unwrap() - 28.8).abs() < 1e-9);
    assert!((run["total_predicted_workload"].as_f64().unwrap() - 144.0).abs() < 1e-9);
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, seed_overloaded_team};
use axum::http::StatusCode;
use capacityrs::domain::models::work_item::{Priority, WorkItem};
use serde_json::{json, Value};
use uuid::Uuid;

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app().await;

    let response = app.server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "OK");
}

/// 生成预测后返回个人预测和过载告警
#[tokio::test]
async fn test_generate_forecast_returns_run() {
    let app = create_test_app().await;
    let team = seed_overloaded_team(&app.source).await;

    let response = app
        .server
        .post(&format!("/v1/boards/{}/forecasts", team.board_id))
        .json(&json!({ "days_ahead": 21 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let run: Value = response.json();
    let forecasts = run["forecasts"].as_array().unwrap();
    assert_eq!(forecasts.len(), 2);
    assert_eq!(forecasts[0]["role_label"], "Frontend");
    assert!((forecasts[0]["predicted_workload_hours"].as_f64().unwrap() - 105.6).abs() < 1e-9);
    assert_eq!(forecasts[0]["available_capacity_hours"].as_f64().unwrap(), 60.0);

    let alerts = run["alerts"].as_array().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["alert_level"], "critical");
    assert_eq!(alerts[0]["message"], "Bob is critically overloaded (176% capacity)");
}

#[tokio::test]
async fn test_generate_forecast_without_body_uses_default_period() {
    let app = create_test_app().await;
    let team = seed_overloaded_team(&app.source).await;

    let response = app
        .server
        .post(&format!("/v1/boards/{}/forecasts", team.board_id))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let run: Value = response.json();
    let start = chrono::NaiveDate::parse_from_str(run["period_start"].as_str().unwrap(), "%Y-%m-%d").unwrap();
    let end = chrono::NaiveDate::parse_from_str(run["period_end"].as_str().unwrap(), "%Y-%m-%d").unwrap();
    assert_eq!((end - start).num_days(), 21);
}

#[tokio::test]
async fn test_generate_forecast_rejects_out_of_range_period() {
    let app = create_test_app().await;
    let team = seed_overloaded_team(&app.source).await;

    let response = app
        .server
        .post(&format!("/v1/boards/{}/forecasts", team.board_id))
        .json(&json!({ "days_ahead": 90 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_unknown_board_is_not_found() {
    let app = create_test_app().await;

    let response = app
        .server
        .post(&format!("/v1/boards/{}/forecasts", Uuid::new_v4()))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_summary_is_null_before_first_run() {
    let app = create_test_app().await;
    let team = seed_overloaded_team(&app.source).await;

    let response = app
        .server
        .get(&format!("/v1/boards/{}/forecasts/summary", team.board_id))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert!(body.is_null());
}

#[tokio::test]
async fn test_summary_and_chart_after_run() {
    let app = create_test_app().await;
    let team = seed_overloaded_team(&app.source).await;
    app.server
        .post(&format!("/v1/boards/{}/forecasts", team.board_id))
        .await;

    let summary: Value = app
        .server
        .get(&format!("/v1/boards/{}/forecasts/summary", team.board_id))
        .add_query_param("days", 30)
        .await
        .json();
    assert_eq!(summary["total_members"], 2);
    assert_eq!(summary["overloaded_members"], 1);
    assert_eq!(summary["active_alerts"], 1);
    assert_eq!(summary["critical_alerts"], 1);
    assert_eq!(summary["total_capacity"].as_f64().unwrap(), 180.0);
    assert!((summary["team_utilization_percent"].as_f64().unwrap() - 64.0).abs() < 1e-9);

    let chart: Value = app
        .server
        .get(&format!("/v1/boards/{}/forecasts/chart", team.board_id))
        .await
        .json();
    assert_eq!(chart["labels"].as_array().unwrap().len(), 2);
    assert_eq!(chart["overloaded"], json!([true, false]));
}

#[tokio::test]
async fn test_alert_list_and_lifecycle() {
    let app = create_test_app().await;
    let team = seed_overloaded_team(&app.source).await;
    app.server
        .post(&format!("/v1/boards/{}/forecasts", team.board_id))
        .await;

    let alerts: Value = app
        .server
        .get(&format!("/v1/boards/{}/alerts", team.board_id))
        .add_query_param("status", "active")
        .await
        .json();
    let alert_id = alerts[0]["id"].as_str().unwrap().to_string();
    let actor = Uuid::new_v4();

    let response = app
        .server
        .post(&format!("/v1/alerts/{}/acknowledge", alert_id))
        .json(&json!({ "actor": actor }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let acknowledged: Value = response.json();
    assert_eq!(acknowledged["status"], "acknowledged");
    assert_eq!(acknowledged["acknowledged_by"], actor.to_string());

    let again = app
        .server
        .post(&format!("/v1/alerts/{}/acknowledge", alert_id))
        .json(&json!({ "actor": actor }))
        .await;
    assert_eq!(again.status_code(), StatusCode::CONFLICT);

    let resolved = app
        .server
        .post(&format!("/v1/alerts/{}/resolve", alert_id))
        .json(&json!({ "actor": actor }))
        .await;
    assert_eq!(resolved.status_code(), StatusCode::OK);

    let active: Value = app
        .server
        .get(&format!("/v1/boards/{}/alerts", team.board_id))
        .add_query_param("status", "active")
        .await
        .json();
    assert!(active.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_alert_is_not_found() {
    let app = create_test_app().await;

    let response = app
        .server
        .post(&format!("/v1/alerts/{}/resolve", Uuid::new_v4()))
        .json(&json!({ "actor": Uuid::new_v4() }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_suggested_assignee_prefers_member_with_headroom() {
    let app = create_test_app().await;
    let team = seed_overloaded_team(&app.source).await;
    let item = WorkItem::new(team.board_id, "new endpoint", Priority::High)
        .assigned_to(team.bob)
        .with_complexity(50);
    let item_id = item.id;
    app.source.add_work_item(item).await;
    app.server
        .post(&format!("/v1/boards/{}/forecasts", team.board_id))
        .await;

    let response = app
        .server
        .get(&format!(
            "/v1/boards/{}/work-items/{}/suggested-assignee",
            team.board_id, item_id
        ))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let suggestion: Value = response.json();
    assert_eq!(suggestion["current_assignee"], team.bob.to_string());
    assert_eq!(suggestion["suggested_assignee"], team.carol.to_string());
    assert_eq!(suggestion["impact"]["estimated_hours"].as_f64().unwrap(), 8.0);
    assert_eq!(suggestion["impact"]["impact_level"], "critical");
}

#[tokio::test]
async fn test_suggested_assignee_for_missing_item_is_not_found() {
    let app = create_test_app().await;
    let team = seed_overloaded_team(&app.source).await;

    let response = app
        .server
        .get(&format!(
            "/v1/boards/{}/work-items/{}/suggested-assignee",
            team.board_id,
            Uuid::new_v4()
        ))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use capacityrs::config::settings::{CapacityModel, ForecastSettings};
use capacityrs::domain::models::alert::AlertLevel;
use capacityrs::domain::models::work_item::{Priority, WorkItem, WorkItemStatus};
use capacityrs::domain::services::alert_engine::AlertEngine;
use capacityrs::domain::services::forecast_calculator::ForecastCalculator;
use capacityrs::domain::services::workload_analyzer::{ImpactLevel, WorkloadAnalyzer};
use capacityrs::domain::services::workload_estimator::WorkloadEstimator;
use uuid::Uuid;

/// 估算、预测和告警分级串起来的结果
#[test]
fn test_estimate_predict_and_classify() {
    let settings = ForecastSettings::default();
    let board_id = Uuid::new_v4();
    let items = vec![
        WorkItem::new(board_id, "a", Priority::Medium),
        WorkItem::new(board_id, "b", Priority::Urgent),
        WorkItem::new(board_id, "c", Priority::Low).with_estimate(2.0),
        WorkItem::new(board_id, "d", Priority::High).with_status(WorkItemStatus::Done),
    ];

    let estimate = WorkloadEstimator::new(&settings).estimate(&items).unwrap();
    assert_eq!(estimate.open_items, 3);
    assert_eq!(estimate.high_priority_items, 1);
    assert!((estimate.hours - 22.0).abs() < 1e-9);

    let calculator = ForecastCalculator::new(&settings);
    let predicted = calculator.predict_workload(estimate.hours);
    let capacity = calculator.available_capacity(7, Some(30.0));
    assert!((predicted - 26.4).abs() < 1e-9);
    assert!((capacity - 30.0).abs() < 1e-9);

    let engine = AlertEngine::new(&settings);
    assert_eq!(engine.classify(predicted / capacity * 100.0), Some(AlertLevel::Warning));
    assert_eq!(engine.classify(79.9), None);
    assert_eq!(engine.classify(100.0), Some(AlertLevel::Critical));
}

#[test]
fn test_fixed_working_days_ignores_profile() {
    let settings = ForecastSettings {
        capacity_model: CapacityModel::FixedWorkingDays,
        ..Default::default()
    };
    let calculator = ForecastCalculator::new(&settings);
    assert!((calculator.available_capacity(14, Some(10.0)) - 80.0).abs() < 1e-9);
    assert_eq!(calculator.available_capacity(0, Some(10.0)), 0.0);
}

#[test]
fn test_urgent_complex_item_is_critical_impact() {
    let item = WorkItem::new(Uuid::new_v4(), "incident", Priority::Urgent).with_complexity(100);
    let impact = WorkloadAnalyzer::task_workload_impact(&item);
    assert_eq!(impact.impact_level, ImpactLevel::Critical);
    assert!(impact.estimated_hours > 4.0);
}

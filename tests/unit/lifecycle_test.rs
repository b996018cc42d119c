// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use capacityrs::domain::models::alert::{AlertLevel, AlertStatus, AlertType, CapacityAlert};
use capacityrs::domain::models::recommendation::{
    DistributionRecommendation, RecommendationStatus, RecommendationType,
};
use capacityrs::domain::models::work_item::DomainError;
use uuid::Uuid;

fn alert() -> CapacityAlert {
    CapacityAlert::new(
        Uuid::new_v4(),
        AlertType::Individual,
        AlertLevel::Warning,
        "Alice is approaching capacity limit (85% capacity)".to_string(),
        85,
    )
}

fn recommendation() -> DistributionRecommendation {
    DistributionRecommendation::new(
        Uuid::new_v4(),
        Uuid::new_v4(),
        RecommendationType::Defer,
        7,
        "Defer: Dashboard polish".to_string(),
        "Consider deferring low-priority task".to_string(),
        2.0,
        0.85,
    )
}

#[test]
fn test_alert_acknowledge_then_resolve() {
    let actor = Uuid::new_v4();
    let acknowledged = alert().acknowledge(actor).unwrap();
    assert_eq!(acknowledged.status, AlertStatus::Acknowledged);
    assert_eq!(acknowledged.acknowledged_by, Some(actor));
    assert!(acknowledged.acknowledged_at.is_some());

    let resolved = acknowledged.resolve(actor).unwrap();
    assert_eq!(resolved.status, AlertStatus::Resolved);
    assert_eq!(resolved.resolved_by, Some(actor));
}

#[test]
fn test_resolved_alert_cannot_be_acknowledged() {
    let actor = Uuid::new_v4();
    let resolved = alert().resolve(actor).unwrap();
    let err = resolved.acknowledge(actor).unwrap_err();
    assert!(matches!(err, DomainError::InvalidStateTransition { .. }));
}

#[test]
fn test_recommendation_accept_then_implement() {
    let accepted = recommendation().accept().unwrap();
    assert_eq!(accepted.status, RecommendationStatus::Accepted);

    let implemented = accepted
        .implement(Some("moved to next sprint".to_string()))
        .unwrap();
    assert_eq!(implemented.status, RecommendationStatus::Implemented);
    assert_eq!(
        implemented.implementation_note.as_deref(),
        Some("moved to next sprint")
    );
    assert!(implemented.implemented_at.is_some());
}

#[test]
fn test_rejected_recommendation_is_terminal() {
    let rejected = recommendation().reject().unwrap();
    assert!(rejected.clone().accept().is_err());
    assert!(rejected.implement(None).is_err());
}

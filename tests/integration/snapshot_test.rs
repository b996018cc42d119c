// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use capacityrs::domain::models::board::Board;
use capacityrs::domain::models::work_item::{Priority, WorkItem, WorkItemStatus};
use capacityrs::domain::repositories::board_repository::{BoardReadPort, RoleDirectory};
use capacityrs::infrastructure::repositories::snapshot_board_source::{
    BoardSnapshot, SnapshotBoardSource,
};
use std::io::Write;
use tempfile::Builder;
use uuid::Uuid;

const YAML_SNAPSHOT: &str = r#"
boards:
  - id: 7d3c9a8e-2f0b-4c1e-9a55-1f0e6b2a4c10
    name: Platform
    members:
      - 0b6f1a52-6c8e-4d8f-8a11-3c2d5e7f9a01
profiles:
  - resource_id: 0b6f1a52-6c8e-4d8f-8a11-3c2d5e7f9a01
    display_name: Alice Chen
roles:
  0b6f1a52-6c8e-4d8f-8a11-3c2d5e7f9a01: Backend
work_items:
  - id: 3f1e0d2c-0001-4000-8000-000000000001
    board_id: 7d3c9a8e-2f0b-4c1e-9a55-1f0e6b2a4c10
    title: Audit logging
    priority: high
    assignee: 0b6f1a52-6c8e-4d8f-8a11-3c2d5e7f9a01
    status: in_progress
  - id: 3f1e0d2c-0002-4000-8000-000000000002
    board_id: 7d3c9a8e-2f0b-4c1e-9a55-1f0e6b2a4c10
    title: Backlog grooming
"#;

#[tokio::test]
async fn test_load_yaml_snapshot() {
    let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(YAML_SNAPSHOT.as_bytes()).unwrap();

    let source = SnapshotBoardSource::load(file.path()).await.unwrap();
    let board_id = Uuid::parse_str("7d3c9a8e-2f0b-4c1e-9a55-1f0e6b2a4c10").unwrap();
    let alice = Uuid::parse_str("0b6f1a52-6c8e-4d8f-8a11-3c2d5e7f9a01").unwrap();

    let board = source.find_board(board_id).await.unwrap().unwrap();
    assert_eq!(board.members, vec![alice]);

    let profile = source.find_profile(alice).await.unwrap().unwrap();
    assert_eq!(profile.display_name, "Alice Chen");
    assert!(profile.weekly_capacity_hours.is_none());
    assert_eq!(source.role_of(alice).await.unwrap().as_deref(), Some("Backend"));

    let assigned = source.assigned_work_items(board_id, alice).await.unwrap();
    assert_eq!(assigned.len(), 1);
    assert_eq!(assigned[0].priority, Priority::High);
    assert_eq!(assigned[0].status, WorkItemStatus::InProgress);

    let unassigned = source.unassigned_work_items(board_id).await.unwrap();
    assert_eq!(unassigned.len(), 1);
    assert_eq!(unassigned[0].priority, Priority::Medium);
    assert_eq!(unassigned[0].status, WorkItemStatus::Todo);
}

#[tokio::test]
async fn test_load_json_snapshot() {
    let member = Uuid::new_v4();
    let board = Board::new("Mobile", vec![member]);
    let board_id = board.id;
    let snapshot = BoardSnapshot {
        boards: vec![board],
        work_items: vec![WorkItem::new(board_id, "release", Priority::Urgent).assigned_to(member)],
        ..Default::default()
    };

    let mut file = Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(serde_json::to_string(&snapshot).unwrap().as_bytes())
        .unwrap();

    let source = SnapshotBoardSource::load(file.path()).await.unwrap();
    assert!(source.find_board(board_id).await.unwrap().is_some());
    assert!(source.find_profile(member).await.unwrap().is_none());
    assert_eq!(
        source.assigned_work_items(board_id, member).await.unwrap().len(),
        1
    );
}

#[tokio::test]
async fn test_missing_snapshot_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = SnapshotBoardSource::load(dir.path().join("missing.json")).await;
    assert!(result.is_err());
}

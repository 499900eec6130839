mod common;

use common::{at, create_test_tracker};
use tend_core::{
    care::RecurrenceKind,
    params::{Agenda, CloseTask, CreatePlant, CreateTask, Id},
    CareKind, CompletionRecord, TaskStatus,
};

async fn plant(tracker: &tend_core::Tracker, name: &str) -> u64 {
    tracker
        .create_plant(
            &CreatePlant {
                name: name.to_string(),
                ..Default::default()
            },
            at("2021-01-01T00:00:00Z"),
        )
        .await
        .expect("Failed to create plant")
        .id
}

#[tokio::test]
async fn test_monthly_cycle_chain_clamps_short_months() {
    let (_temp_dir, tracker) = create_test_tracker("UTC").await;
    let plant_id = plant(&tracker, "Lemon tree").await;

    let mut task = tracker
        .create_task(
            &CreateTask {
                plant_id,
                kind: CareKind::Fertilize,
                start: Some("2021-01-31T10:00:00Z".to_string()),
                repeat: Some(RecurrenceKind::Monthly),
                days: Some(vec![31]),
                ..Default::default()
            },
            at("2021-01-31T10:00:00Z"),
        )
        .await
        .unwrap();

    let mut dues = Vec::new();
    for _ in 0..3 {
        let due = task.schedule.due_date().timestamp();
        dues.push(due.to_string());
        let (_, next) = tracker
            .complete_task(&CloseTask { id: task.id, at: None }, due)
            .await
            .unwrap();
        task = next.expect("monthly task rolls over");
    }

    assert_eq!(
        dues,
        [
            "2021-02-28T10:00:00Z",
            "2021-03-31T10:00:00Z",
            "2021-04-30T10:00:00Z"
        ]
    );
}

#[tokio::test]
async fn test_days_follow_the_configured_time_zone() {
    let (_temp_dir, tracker) = create_test_tracker("Asia/Tokyo").await;
    let plant_id = plant(&tracker, "Bonsai").await;

    // 2021-06-10 in Tokyo; due 2021-06-11 00:00 JST == 2021-06-10T15:00Z.
    let task = tracker
        .create_task(
            &CreateTask {
                plant_id,
                start: Some("2021-06-10".to_string()),
                due: Some("2021-06-11".to_string()),
                ..Default::default()
            },
            at("2021-06-10T00:00:00Z"),
        )
        .await
        .unwrap();
    assert_eq!(
        task.schedule.due_date().timestamp(),
        at("2021-06-10T15:00:00Z")
    );

    // 2021-06-11T14:59Z is still 23:59 on the due day in Tokyo.
    let shown = tracker
        .show_task(&Id { id: task.id }, at("2021-06-11T14:59:00Z"))
        .await
        .unwrap();
    assert_eq!(shown.status, TaskStatus::Due);

    let shown = tracker
        .show_task(&Id { id: task.id }, at("2021-06-11T15:00:00Z"))
        .await
        .unwrap();
    assert_eq!(shown.status, TaskStatus::Late);

    let agenda = tracker
        .agenda(&Agenda::default(), at("2021-06-10T16:00:00Z"))
        .await
        .unwrap();
    assert_eq!(agenda.len(), 1);
}

#[tokio::test]
async fn test_completion_serializes_as_boundary_record() {
    let (_temp_dir, tracker) = create_test_tracker("UTC").await;
    let plant_id = plant(&tracker, "Basil").await;
    let task = tracker
        .create_task(
            &serde_json::from_value(serde_json::json!({
                "plant_id": plant_id,
                "start": "2021-06-10T08:00:00Z",
                "repeat": "weekly",
                "days": [2, 4, 6]
            }))
            .unwrap(),
            at("2021-06-10T08:00:00Z"),
        )
        .await
        .unwrap();

    let result = tracker
        .complete_task_result(
            &CloseTask {
                id: task.id,
                at: Some("2021-06-12T18:00:00Z".to_string()),
            },
            at("2021-06-12T18:30:00Z"),
        )
        .await
        .unwrap();

    let record = CompletionRecord::from(&result);
    assert_eq!(
        serde_json::to_value(&record).unwrap(),
        serde_json::json!({
            "status": "done",
            "nextTask": {
                "startDate": "2021-06-12T18:00:00Z",
                "recurrenceKind": "weekly",
                "interval": 1,
                "dayConstraints": [2, 4, 6],
                "dueDate": "2021-06-15T18:00:00Z",
                "status": "due"
            }
        })
    );
}

#[tokio::test]
async fn test_show_plant_lists_every_cycle() {
    let (_temp_dir, tracker) = create_test_tracker("UTC").await;
    let plant_id = plant(&tracker, "Calathea").await;
    let task = tracker
        .create_task(
            &CreateTask {
                plant_id,
                kind: CareKind::Mist,
                start: Some("2021-06-10T08:00:00Z".to_string()),
                repeat: Some(RecurrenceKind::Daily),
                interval: Some(2),
                ..Default::default()
            },
            at("2021-06-10T08:00:00Z"),
        )
        .await
        .unwrap();
    tracker
        .complete_task(
            &CloseTask { id: task.id, at: None },
            at("2021-06-12T09:00:00Z"),
        )
        .await
        .unwrap();

    let shown = tracker
        .show_plant(&Id { id: plant_id }, at("2021-06-12T09:00:00Z"))
        .await
        .unwrap();
    assert_eq!(shown.tasks.len(), 2);
    let output = shown.to_string();
    assert!(output.starts_with("# 1. Calathea"));
    assert!(output.contains("every 2 days"));
    assert!(output.contains("✓ Done"));
    assert!(output.contains("Follows: task 1"));
}

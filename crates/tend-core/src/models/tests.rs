//! Tests for the models module.

use super::*;
use crate::params::ListTasks;

#[test]
fn test_task_status_round_trips_through_storage_strings() {
    for status in [
        TaskStatus::Due,
        TaskStatus::Late,
        TaskStatus::Done,
        TaskStatus::Skipped,
    ] {
        assert_eq!(status.as_str().parse::<TaskStatus>(), Ok(status));
    }
}

#[test]
fn test_task_status_parse_accepts_aliases_and_case() {
    assert_eq!("OVERDUE".parse::<TaskStatus>(), Ok(TaskStatus::Late));
    assert_eq!("Done".parse::<TaskStatus>(), Ok(TaskStatus::Done));
    assert!("finished".parse::<TaskStatus>().is_err());
}

#[test]
fn test_terminal_statuses() {
    assert!(!TaskStatus::Due.is_terminal());
    assert!(!TaskStatus::Late.is_terminal());
    assert!(TaskStatus::Done.is_terminal());
    assert!(TaskStatus::Skipped.is_terminal());
    assert_eq!(TaskStatus::default(), TaskStatus::Due);
}

#[test]
fn test_task_status_serializes_lowercase() {
    let json = serde_json::to_string(&TaskStatus::Skipped).unwrap();
    assert_eq!(json, "\"skipped\"");
}

#[test]
fn test_care_kind_parse() {
    assert_eq!("feed".parse::<CareKind>(), Ok(CareKind::Fertilize));
    assert_eq!("Mist".parse::<CareKind>(), Ok(CareKind::Mist));
    assert_eq!(CareKind::Repot.as_str(), "repot");
    assert!("sing".parse::<CareKind>().is_err());
}

#[test]
fn test_task_filter_from_list_params() {
    let open: TaskFilter = (&ListTasks {
        plant_id: Some(3),
        kind: None,
        all: false,
    })
        .into();
    assert_eq!(open.plant_id, Some(3));
    assert_eq!(open.statuses, vec![TaskStatus::Due, TaskStatus::Late]);

    let all: TaskFilter = (&ListTasks {
        plant_id: None,
        kind: Some(CareKind::Water),
        all: true,
    })
        .into();
    assert!(all.statuses.is_empty());
    assert_eq!(all.kind, Some(CareKind::Water));
}

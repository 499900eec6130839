use jiff::Timestamp;
use tempfile::TempDir;
use tend_core::{Tracker, TrackerBuilder};

/// A tracker on a fresh database in a temporary directory.
pub async fn create_test_tracker(time_zone: &str) -> (TempDir, Tracker) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let tracker = TrackerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_time_zone(Some(time_zone))
        .build()
        .await
        .expect("Failed to create tracker");
    (temp_dir, tracker)
}

pub fn at(s: &str) -> Timestamp {
    s.parse().expect("valid timestamp")
}

use jiff::Timestamp;
use rusqlite::{params, Connection};
use tempfile::NamedTempFile;
use tend_core::{
    care::{CareSchedule, CloseAction, RecurrenceRule},
    db::migrations::SCHEMA_VERSION,
    params::CreatePlant,
    CareCalendar, CareError, CareKind, Database, ScheduleError, TaskFilter, TaskStatus,
};

fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path(), CareCalendar::utc())
        .expect("Failed to create test database");
    (temp_file, db)
}

fn at(s: &str) -> Timestamp {
    s.parse().expect("valid timestamp")
}

fn plant(db: &mut Database, name: &str) -> u64 {
    db.create_plant(
        &CreatePlant {
            name: name.to_string(),
            ..Default::default()
        },
        at("2021-06-01T08:00:00Z"),
    )
    .expect("Failed to create plant")
    .id
}

fn daily(start: &str) -> CareSchedule {
    let calendar = CareCalendar::utc();
    CareSchedule::from_recurrence(
        calendar.to_zoned(at(start)),
        RecurrenceRule::daily(1).unwrap(),
    )
    .unwrap()
}

#[test]
fn test_database_initialization_sets_schema_version() {
    let (temp_file, db) = create_test_db();
    assert!(temp_file.path().exists());
    assert_eq!(db.schema_version().unwrap(), SCHEMA_VERSION);

    // Reopening an initialized database is a no-op.
    let reopened = Database::new(temp_file.path(), CareCalendar::utc()).unwrap();
    assert_eq!(reopened.schema_version().unwrap(), SCHEMA_VERSION);
}

#[test]
fn test_newer_schema_is_rejected() {
    let temp_file = NamedTempFile::new().unwrap();
    let connection = Connection::open(temp_file.path()).unwrap();
    connection
        .execute_batch(&format!("PRAGMA user_version = {}", SCHEMA_VERSION + 1))
        .unwrap();
    drop(connection);

    let result = Database::new(temp_file.path(), CareCalendar::utc());
    assert!(matches!(result, Err(CareError::Configuration { .. })));
}

#[test]
fn test_plants_are_listed_by_name() {
    let (_temp_file, mut db) = create_test_db();
    plant(&mut db, "monstera");
    plant(&mut db, "Aloe");
    plant(&mut db, "basil");

    let names: Vec<String> = db.list_plants().unwrap().into_iter().map(|p| p.name).collect();
    assert_eq!(names, ["Aloe", "basil", "monstera"]);
}

#[test]
fn test_task_round_trips_through_storage() {
    let (_temp_file, mut db) = create_test_db();
    let plant_id = plant(&mut db, "Fern");
    let rule = RecurrenceRule::monthly(1, Some([1, 15])).unwrap();
    let schedule =
        CareSchedule::from_recurrence(CareCalendar::utc().to_zoned(at("2021-06-10T07:00:00Z")), rule)
            .unwrap();

    let created = db
        .create_task(
            plant_id,
            CareKind::Fertilize,
            Some("half strength"),
            &schedule,
            at("2021-06-10T07:00:00Z"),
        )
        .unwrap();
    let stored = db.get_task(created.id).unwrap().expect("task exists");

    assert_eq!(stored, created);
    assert_eq!(stored.schedule.due_date().timestamp(), at("2021-06-15T07:00:00Z"));
    assert_eq!(stored.note.as_deref(), Some("half strength"));
}

#[test]
fn test_task_for_missing_plant_is_rejected() {
    let (_temp_file, mut db) = create_test_db();
    let result = db.create_task(
        99,
        CareKind::Water,
        None,
        &daily("2021-06-10T07:00:00Z"),
        at("2021-06-10T07:00:00Z"),
    );
    assert!(matches!(result, Err(CareError::PlantNotFound { id: 99 })));
}

#[test]
fn test_list_tasks_filters() {
    let (_temp_file, mut db) = create_test_db();
    let fern = plant(&mut db, "Fern");
    let cactus = plant(&mut db, "Cactus");
    let now = at("2021-06-10T07:00:00Z");

    db.create_task(fern, CareKind::Water, None, &daily("2021-06-10T07:00:00Z"), now)
        .unwrap();
    db.create_task(fern, CareKind::Mist, None, &daily("2021-06-08T07:00:00Z"), now)
        .unwrap();
    db.create_task(cactus, CareKind::Water, None, &daily("2021-06-12T07:00:00Z"), now)
        .unwrap();

    let fern_tasks = db
        .list_tasks(&TaskFilter {
            plant_id: Some(fern),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(fern_tasks.len(), 2);
    // Soonest due first.
    assert_eq!(fern_tasks[0].kind, CareKind::Mist);

    let watering = db
        .list_tasks(&TaskFilter {
            kind: Some(CareKind::Water),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(watering.len(), 2);

    let before = db
        .list_tasks(&TaskFilter::open_due_before(at("2021-06-11T08:00:00Z")))
        .unwrap();
    assert_eq!(before.len(), 2);
}

#[test]
fn test_close_task_commits_status_and_next_cycle_together() {
    let (temp_file, mut db) = create_test_db();
    let plant_id = plant(&mut db, "Basil");
    let task = db
        .create_task(
            plant_id,
            CareKind::Water,
            None,
            &daily("2021-06-10T07:00:00Z"),
            at("2021-06-10T07:00:00Z"),
        )
        .unwrap();

    let (closed, next) = db
        .close_task(
            task.id,
            CloseAction::Complete,
            at("2021-06-11T06:00:00Z"),
            at("2021-06-11T06:05:00Z"),
        )
        .unwrap();
    assert_eq!(closed.status, TaskStatus::Done);
    let next = next.unwrap();
    assert_eq!(next.previous_task_id, Some(task.id));

    let connection = Connection::open(temp_file.path()).unwrap();
    let (status, completed_at): (String, String) = connection
        .query_row(
            "SELECT status, completed_at FROM care_tasks WHERE id = ?1",
            params![task.id as i64],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(status, "done");
    assert_eq!(completed_at, "2021-06-11T06:00:00Z");

    let open = db.list_tasks(&TaskFilter::open()).unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].id, next.id);
}

#[test]
fn test_unschedulable_task_is_left_untouched() {
    let (temp_file, mut db) = create_test_db();
    let plant_id = plant(&mut db, "Orchid");

    // A weekly row without weekdays cannot produce a schedule.
    let connection = Connection::open(temp_file.path()).unwrap();
    connection
        .execute(
            "INSERT INTO care_tasks (plant_id, kind, start_date, due_date, recurrence_kind, recurrence_interval, status, created_at, updated_at) \
             VALUES (?1, 'water', '2021-06-10T07:00:00Z', '2021-06-11T07:00:00Z', 'weekly', 1, 'due', '2021-06-10T07:00:00Z', '2021-06-10T07:00:00Z')",
            params![plant_id as i64],
        )
        .unwrap();
    let id = connection.last_insert_rowid() as u64;

    let result = db.close_task(
        id,
        CloseAction::Complete,
        at("2021-06-11T07:00:00Z"),
        at("2021-06-11T07:00:00Z"),
    );
    assert!(matches!(
        result,
        Err(CareError::Schedule(ScheduleError::NoNextOccurrence))
    ));

    let status: String = connection
        .query_row(
            "SELECT status FROM care_tasks WHERE id = ?1",
            params![id as i64],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(status, "due");
    let count: i64 = connection
        .query_row("SELECT COUNT(*) FROM care_tasks", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn test_mark_late_uses_calendar_days() {
    let (_temp_file, mut db) = create_test_db();
    let plant_id = plant(&mut db, "Ivy");
    let task = db
        .create_task(
            plant_id,
            CareKind::Water,
            None,
            &daily("2021-06-10T07:00:00Z"),
            at("2021-06-10T07:00:00Z"),
        )
        .unwrap();

    // Still the due day, just later.
    assert!(db.mark_late(at("2021-06-11T23:59:00Z")).unwrap().is_empty());
    assert_eq!(db.mark_late(at("2021-06-12T00:00:00Z")).unwrap(), vec![task.id]);
    assert_eq!(
        db.get_task(task.id).unwrap().unwrap().status,
        TaskStatus::Late
    );
}

#[test]
fn test_deleting_plant_cascades() {
    let (_temp_file, mut db) = create_test_db();
    let plant_id = plant(&mut db, "Pothos");
    let task = db
        .create_task(
            plant_id,
            CareKind::Rotate,
            None,
            &daily("2021-06-10T07:00:00Z"),
            at("2021-06-10T07:00:00Z"),
        )
        .unwrap();

    assert!(db.delete_plant(plant_id).unwrap());
    assert!(!db.delete_plant(plant_id).unwrap());
    assert!(db.get_task(task.id).unwrap().is_none());
}

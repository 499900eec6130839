use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `tend` command against a fresh database, in UTC, without colors.
fn tend_cmd(db_path: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("tend").expect("Failed to find tend binary");
    cmd.env_remove("TEND_DATABASE_FILE")
        .env_remove("TEND_TIME_ZONE")
        .arg("--no-color")
        .args(["--time-zone", "UTC"])
        .arg("--database-file")
        .arg(db_path);
    cmd
}

fn setup_weekly_basil(db_path: &std::path::Path) {
    tend_cmd(db_path)
        .args(["--at", "2021-06-10T08:00:00Z", "plant", "add", "Basil"])
        .args(["--species", "Ocimum basilicum", "--location", "Kitchen"])
        .assert()
        .success();
    tend_cmd(db_path)
        .args(["--at", "2021-06-10T08:00:00Z", "task", "add", "1"])
        .args(["--repeat", "weekly", "--days", "2,4,6"])
        .assert()
        .success();
}

#[test]
fn test_cli_add_plant() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("cli_test.db");

    tend_cmd(&db_path)
        .args(["plant", "add", "Monstera", "--location", "Living room"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created plant with ID: 1"))
        .stdout(predicate::str::contains("# 1. Monstera"))
        .stdout(predicate::str::contains("- Location: Living room"));
}

#[test]
fn test_cli_list_plants() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("cli_test.db");

    tend_cmd(&db_path)
        .args(["plant", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plants found."));

    setup_weekly_basil(&db_path);

    tend_cmd(&db_path)
        .args(["plant", "ls"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "- 1. Basil (Ocimum basilicum, Kitchen)",
        ));
}

#[test]
fn test_cli_weekly_task_due_date() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("cli_test.db");
    setup_weekly_basil(&db_path);

    tend_cmd(&db_path)
        .args(["--at", "2021-06-10T08:00:00Z", "task", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("### 1. Water (○ Due)"))
        .stdout(predicate::str::contains("- Due: Sat 2021-06-12 08:00 UTC"))
        .stdout(predicate::str::contains(
            "- Repeats: every week on Tue, Thu, Sat",
        ));
}

#[test]
fn test_cli_complete_rolls_over() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("cli_test.db");
    setup_weekly_basil(&db_path);

    tend_cmd(&db_path)
        .args(["--at", "2021-06-12T18:00:00Z", "task", "complete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Closed task 1 as done"))
        .stdout(predicate::str::contains("### 2. Water (○ Due)"))
        .stdout(predicate::str::contains("- Due: Tue 2021-06-15 18:00 UTC"))
        .stdout(predicate::str::contains("- Follows: task 1"));

    tend_cmd(&db_path)
        .args(["task", "done", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already done"));
}

#[test]
fn test_cli_complete_after_due_day_is_late() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("cli_test.db");
    setup_weekly_basil(&db_path);

    tend_cmd(&db_path)
        .args(["--at", "2021-06-14T09:00:00Z", "task", "complete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Closed task 1 as late"))
        .stdout(predicate::str::contains("- Due: Tue 2021-06-15 09:00 UTC"));
}

#[test]
fn test_cli_one_off_task_does_not_repeat() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("cli_test.db");

    tend_cmd(&db_path)
        .args(["--at", "2021-06-10", "plant", "add", "Ficus"])
        .assert()
        .success();
    tend_cmd(&db_path)
        .args(["--at", "2021-06-10", "task", "add", "1", "--kind", "repot"])
        .args(["--due", "2021-06-20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("### 1. Repot"));

    tend_cmd(&db_path)
        .args(["--at", "2021-06-18", "task", "skip", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Closed task 1 as skipped"))
        .stdout(predicate::str::contains("This task does not repeat."));
}

#[test]
fn test_cli_agenda_shows_late_tasks() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("cli_test.db");
    setup_weekly_basil(&db_path);

    tend_cmd(&db_path)
        .args(["--at", "2021-06-11"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Agenda for Fri 2021-06-11"))
        .stdout(predicate::str::contains("Nothing needs care."));

    tend_cmd(&db_path)
        .args(["--at", "2021-06-20", "agenda"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Agenda for Sun 2021-06-20"))
        .stdout(predicate::str::contains("### 1. Water (! Late)"));
}

#[test]
fn test_cli_agenda_days_ahead() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("cli_test.db");
    setup_weekly_basil(&db_path);

    tend_cmd(&db_path)
        .args(["--at", "2021-06-11", "agenda", "--days", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("and the next day"))
        .stdout(predicate::str::contains("### 1. Water"));
}

#[test]
fn test_cli_refresh_marks_late() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("cli_test.db");
    setup_weekly_basil(&db_path);

    tend_cmd(&db_path)
        .args(["--at", "2021-06-20", "refresh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked task 1 late"));

    tend_cmd(&db_path)
        .args(["--at", "2021-06-20", "refresh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks became late"));
}

#[test]
fn test_cli_missing_task_fails() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("cli_test.db");

    tend_cmd(&db_path)
        .args(["task", "show", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Task with ID 9 not found"));
}

#[test]
fn test_cli_rejects_due_with_repeat() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("cli_test.db");

    tend_cmd(&db_path)
        .args(["task", "add", "1", "--repeat", "daily", "--due", "2021-06-20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_cli_remove_plant() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("cli_test.db");
    setup_weekly_basil(&db_path);

    tend_cmd(&db_path)
        .args(["plant", "rm", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Removed plant 'Basil' (ID: 1) and its care tasks",
        ));

    tend_cmd(&db_path)
        .args(["task", "list", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No care tasks found."));
}

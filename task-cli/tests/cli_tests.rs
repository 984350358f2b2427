use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

fn task_cli(dir: &assert_fs::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("task-cli").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("TASK_CLI_FILE")
        .env_remove("TASK_CLI_LOG_LEVEL");
    cmd
}

fn stored_tasks(file: &assert_fs::fixture::ChildPath) -> serde_json::Value {
    let contents = std::fs::read_to_string(file.path()).unwrap();
    serde_json::from_str(&contents).unwrap()
}

#[test]
fn scenario_add_mark_list_delete() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let file = dir.child("tasks.json");

    task_cli(&dir)
        .args(["add", "buy milk"])
        .assert()
        .success()
        .stdout("Task added successfully (ID: 1)\n");
    file.assert(predicate::path::exists());
    assert_eq!(stored_tasks(&file)[0]["status"], "todo");

    task_cli(&dir)
        .args(["add", "write report"])
        .assert()
        .success()
        .stdout("Task added successfully (ID: 2)\n");

    task_cli(&dir)
        .args(["mark-done", "1"])
        .assert()
        .success()
        .stdout("Task updated.\n");
    let tasks = stored_tasks(&file);
    assert_eq!(tasks[0]["status"], "done");
    assert_eq!(tasks[1]["status"], "todo");

    task_cli(&dir)
        .args(["list", "done"])
        .assert()
        .success()
        .stdout("[1] buy milk (done)\n");

    task_cli(&dir)
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout("Task deleted.\n");
    let tasks = stored_tasks(&file);
    assert_eq!(tasks.as_array().unwrap().len(), 1);
    assert_eq!(tasks[0]["id"], 2);

    task_cli(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout("[2] write report (todo)\n");

    Ok(())
}

#[test]
fn file_flag_points_at_isolated_store() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let custom = dir.child("nested/custom.json");

    task_cli(&dir)
        .args(["--file", custom.path().to_str().unwrap(), "add", "buy milk"])
        .assert()
        .success();

    custom.assert(predicate::str::contains("\"description\": \"buy milk\""));
    dir.child("tasks.json").assert(predicate::path::missing());
    Ok(())
}

#[test]
fn file_from_environment() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;

    task_cli(&dir)
        .env("TASK_CLI_FILE", "from-env.json")
        .args(["add", "buy milk"])
        .assert()
        .success();

    dir.child("from-env.json").assert(predicate::path::exists());
    Ok(())
}

#[test]
fn mark_unknown_id_exits_with_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    task_cli(&dir).args(["add", "buy milk"]).assert().success();
    let before = std::fs::read_to_string(dir.child("tasks.json").path())?;

    task_cli(&dir)
        .args(["mark-in-progress", "5"])
        .assert()
        .code(3)
        .stdout("Task not found.\n");

    let after = std::fs::read_to_string(dir.child("tasks.json").path())?;
    assert_eq!(before, after);
    Ok(())
}

#[test]
fn delete_unknown_id_exits_with_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    task_cli(&dir).args(["add", "buy milk"]).assert().success();

    task_cli(&dir)
        .args(["delete", "5"])
        .assert()
        .code(3)
        .stdout("Task not found.\n");

    assert_eq!(stored_tasks(&dir.child("tasks.json"))[0]["id"], 1);
    Ok(())
}

#[test]
fn ids_are_not_reused_after_deleting_from_the_middle() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    for description in ["a", "b", "c"] {
        task_cli(&dir).args(["add", description]).assert().success();
    }
    task_cli(&dir).args(["delete", "2"]).assert().success();

    task_cli(&dir)
        .args(["add", "d"])
        .assert()
        .success()
        .stdout("Task added successfully (ID: 4)\n");
    Ok(())
}

#[test]
fn malformed_file_is_reported_and_left_alone() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let file = dir.child("tasks.json");
    file.write_str("not json at all")?;

    task_cli(&dir)
        .args(["add", "buy milk"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("malformed"));

    file.assert("not json at all");
    Ok(())
}

#[test]
fn missing_description_is_a_usage_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;

    task_cli(&dir).arg("add").assert().code(2);
    task_cli(&dir)
        .args(["add", "  "])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("must not be empty"));

    dir.child("tasks.json").assert(predicate::path::missing());
    Ok(())
}

#[test]
fn no_command_prints_usage() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;

    task_cli(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
    Ok(())
}

#[test]
fn unknown_command_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;

    task_cli(&dir)
        .arg("frobnicate")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
    Ok(())
}

#[test]
fn invalid_list_filter_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;

    task_cli(&dir)
        .args(["list", "finished"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "expected one of: todo, in-progress, done",
        ));
    Ok(())
}

#[test]
fn add_past_the_largest_id_fails_without_rewriting() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let file = dir.child("tasks.json");
    let full = r#"[{"id": 4294967295, "description": "last", "status": "todo", "createdAt": "2023-01-01T00:00:00.000Z", "updatedAt": "2023-01-01T00:00:00.000Z"}]"#;
    file.write_str(full)?;

    task_cli(&dir)
        .args(["add", "one more"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("no task ids left"));

    file.assert(full);
    Ok(())
}

//! End-to-end checks of `TaskManager` against the JSON file store.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tasklet_app::{CreateTaskInput, ErrorKind, ManagerError, TaskManager, UpdateTaskInput};
use tasklet_core::{Priority, StatusFilter, TaskId};
use tasklet_store_json::JsonStore;
use tempfile::TempDir;

/// Test helper: manager over a fresh file inside a temp dir.
fn setup() -> (TempDir, PathBuf, TaskManager<JsonStore>) {
    let dir = TempDir::with_prefix("tasklet-manager-test-").expect("create temp dir");
    let path = dir.path().join("tasks.json");
    let manager = TaskManager::new(JsonStore::new(&path));
    (dir, path, manager)
}

fn read_raw(path: &Path) -> serde_json::Value {
    let raw = fs::read_to_string(path).expect("read task file");
    serde_json::from_str(&raw).expect("parse task file")
}

#[test]
fn adding_tasks_yields_sequential_ids_on_disk() -> Result<()> {
    let (_dir, path, manager) = setup();

    for n in 1..=5 {
        let task = manager.add(CreateTaskInput::titled(format!("task {n}")))?;
        assert_eq!(task.id, TaskId(n));
    }

    let raw = read_raw(&path);
    let ids: Vec<u64> = raw
        .as_array()
        .unwrap()
        .iter()
        .map(|record| record["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    Ok(())
}

#[test]
fn storage_persists_fields_for_a_new_manager() -> Result<()> {
    let (_dir, path, manager) = setup();
    manager.add(CreateTaskInput {
        description: "玄関".into(),
        ..CreateTaskInput::titled("掃除")
    })?;

    let raw = read_raw(&path);
    assert_eq!(raw[0]["title"], "掃除");
    assert_eq!(raw[0]["description"], "玄関");
    assert_eq!(raw[0]["priority"], "normal");
    assert!(raw[0]["due_date"].is_null());

    let reopened = TaskManager::new(JsonStore::new(&path));
    let tasks = reopened.list(StatusFilter::All)?;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].description, "玄関");
    Ok(())
}

#[test]
fn invalid_priority_leaves_file_absent() {
    let (_dir, path, manager) = setup();

    let result = manager.add(CreateTaskInput {
        priority: Some("urgent".into()),
        ..CreateTaskInput::titled("x")
    });

    let err = result.expect_err("urgent is not a priority");
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(err.to_string().contains("low, normal, high"));
    assert!(!path.exists());
}

#[test]
fn invalid_update_leaves_file_unchanged() -> Result<()> {
    let (_dir, path, manager) = setup();
    let task = manager.add(CreateTaskInput::titled("日付"))?;
    let before = fs::read_to_string(&path)?;

    let result = manager.update(
        task.id,
        UpdateTaskInput {
            due_date: Some("2024/12/01".into()),
            ..UpdateTaskInput::default()
        },
    );

    assert!(matches!(result, Err(ManagerError::InvalidField(_))));
    assert_eq!(fs::read_to_string(&path)?, before);
    Ok(())
}

#[test]
fn listing_order_and_filters() -> Result<()> {
    let (_dir, _path, manager) = setup();
    let with_due = |title: &str, due: &str| CreateTaskInput {
        due_date: Some(due.into()),
        ..CreateTaskInput::titled(title)
    };

    let done = manager.add(with_due("done", "2023-01-01"))?;
    manager.add(CreateTaskInput::titled("undated"))?;
    manager.add(with_due("june", "2024-06-01"))?;
    manager.add(with_due("january", "2024-01-01"))?;
    manager.complete(done.id, true)?;

    let titles = |status| -> Result<Vec<String>> {
        Ok(manager
            .list(status)?
            .into_iter()
            .map(|task| task.title)
            .collect())
    };

    assert_eq!(titles(StatusFilter::All)?, ["january", "june", "undated", "done"]);
    assert_eq!(titles(StatusFilter::Pending)?, ["january", "june", "undated"]);
    assert_eq!(titles(StatusFilter::Completed)?, ["done"]);
    Ok(())
}

#[test]
fn partial_update_preserves_untouched_fields() -> Result<()> {
    let (_dir, _path, manager) = setup();
    let task = manager.add(CreateTaskInput {
        description: "d".into(),
        priority: Some("low".into()),
        ..CreateTaskInput::titled("A")
    })?;

    let updated = manager.update(
        task.id,
        UpdateTaskInput {
            title: Some("B".into()),
            ..UpdateTaskInput::default()
        },
    )?;

    assert_eq!(updated.title, "B");
    assert_eq!(updated.description, "d");
    assert_eq!(updated.priority, Priority::Low);
    assert!(updated.updated_at > task.updated_at);
    assert_eq!(manager.get(task.id)?, updated);
    Ok(())
}

#[test]
fn clearing_and_keeping_due_date() -> Result<()> {
    let (_dir, path, manager) = setup();
    let task = manager.add(CreateTaskInput {
        due_date: Some("2024-01-01".into()),
        ..CreateTaskInput::titled("t")
    })?;

    let kept = manager.update(task.id, UpdateTaskInput::default())?;
    assert_eq!(kept.due_date, task.due_date);

    let cleared = manager.update(
        task.id,
        UpdateTaskInput {
            due_date: Some(String::new()),
            ..UpdateTaskInput::default()
        },
    )?;
    assert_eq!(cleared.due_date, None);
    assert!(read_raw(&path)[0]["due_date"].is_null());
    Ok(())
}

#[test]
fn delete_shrinks_list_and_unknown_id_is_not_found() -> Result<()> {
    let (_dir, _path, manager) = setup();
    let first = manager.add(CreateTaskInput::titled("メール送信"))?;
    let second = manager.add(CreateTaskInput::titled("資料レビュー"))?;

    manager.delete(first.id)?;

    let remaining = manager.list(StatusFilter::All)?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, second.id);

    let err = manager.delete(TaskId(99)).expect_err("unknown id");
    assert_eq!(err.kind(), ErrorKind::NotFound);
    Ok(())
}

#[test]
fn deleting_the_newest_task_frees_its_id() -> Result<()> {
    let (_dir, _path, manager) = setup();
    manager.add(CreateTaskInput::titled("a"))?;
    let newest = manager.add(CreateTaskInput::titled("b"))?;

    manager.delete(newest.id)?;
    let next = manager.add(CreateTaskInput::titled("c"))?;

    assert_eq!(next.id, newest.id);
    Ok(())
}

#[test]
fn malformed_file_is_reported_distinctly() -> Result<()> {
    let (_dir, path, manager) = setup();
    fs::write(&path, "not json at all")?;

    let err = manager.list(StatusFilter::All).expect_err("malformed file");
    assert_eq!(err.kind(), ErrorKind::Malformed);

    let err = manager
        .add(CreateTaskInput::titled("x"))
        .expect_err("malformed file blocks writes");
    assert_eq!(err.kind(), ErrorKind::Malformed);
    assert_eq!(fs::read_to_string(&path)?, "not json at all");
    Ok(())
}

#[test]
fn undecodable_bytes_are_reported_as_malformed() -> Result<()> {
    let (_dir, path, manager) = setup();
    fs::write(&path, [0xff, 0xfe, b'[', b']'])?;

    let err = manager.list(StatusFilter::All).expect_err("invalid UTF-8");

    assert_eq!(err.kind(), ErrorKind::Malformed);
    Ok(())
}

#[test]
fn add_at_the_id_ceiling_leaves_file_unchanged() -> Result<()> {
    let (_dir, path, manager) = setup();
    let seeded = r#"[{"id": 18446744073709551615, "title": "top"}]"#;
    fs::write(&path, seeded)?;

    let err = manager
        .add(CreateTaskInput::titled("next"))
        .expect_err("no id left");

    assert!(matches!(err, ManagerError::IdsExhausted(_)));
    assert_eq!(fs::read_to_string(&path)?, seeded);
    Ok(())
}

#[test]
fn repeated_updates_keep_advancing_updated_at() -> Result<()> {
    let (_dir, _path, manager) = setup();
    let task = manager.add(CreateTaskInput::titled("t"))?;

    let first = manager.complete(task.id, true)?;
    let second = manager.complete(task.id, false)?;

    assert!(first.updated_at > task.updated_at);
    assert!(second.updated_at > first.updated_at);
    Ok(())
}
